//! Input data model: milestones and the selectors that steer layout.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Gap style from a milestone to the *next* one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "i64")]
pub enum TransitionCategory {
    /// Fixed small gap (`smallGap`).
    Small,
    /// Elastic gap, solved so the axis fills the layout width.
    #[default]
    Elastic,
    /// Fixed gap with a decorative warp detour (`warpGap + warpSpace`).
    Warp,
}

impl TryFrom<i64> for TransitionCategory {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransitionCategory::Small),
            1 => Ok(TransitionCategory::Elastic),
            2 => Ok(TransitionCategory::Warp),
            _ => Err(ConfigError::InvalidTransition { value }),
        }
    }
}

/// Parsed form of a milestone's `year` token.
///
/// Plain integers are policy years; a leading `A` marks an age (`"A60"` is
/// "at age 60").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearToken {
    Policy(i32),
    Age(i32),
}

impl YearToken {
    pub const AGE_SENTINEL: char = 'A';

    /// Parse a token; `None` when the numeric part is not an integer.
    pub fn parse(token: &str) -> Option<YearToken> {
        let token = token.trim();
        match token.strip_prefix(Self::AGE_SENTINEL) {
            Some(age) => age.trim().parse().ok().map(YearToken::Age),
            None => token.parse().ok().map(YearToken::Policy),
        }
    }

    /// Whether the raw token carries the age sentinel (parseable or not).
    pub fn is_age_token(token: &str) -> bool {
        token.trim_start().starts_with(Self::AGE_SENTINEL)
    }

    /// Token text as shown under the axis (sentinel stripped).
    pub fn display(token: &str) -> String {
        token.replace(Self::AGE_SENTINEL, "")
    }

    /// Policy year used as the benefit-table key; `None` when `age - issue_age`
    /// leaves the `i32` range.
    pub fn policy_year(self, issue_age: i32) -> Option<i32> {
        match self {
            YearToken::Policy(year) => Some(year),
            YearToken::Age(age) => age.checked_sub(issue_age),
        }
    }
}

/// One point on the timeline axis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    pub id: String,
    pub label: Option<String>,
    #[serde(alias = "isMajor")]
    pub major: bool,
    /// Monetary value string shown above the premium-end arrow.
    pub value: Option<String>,
    pub year: Option<String>,
    /// Callout tier. Absent or `-1` means no callout, `99` a zero offset.
    pub level: Option<i32>,
    /// Precomputed amount label, used when no benefit lookup applies.
    pub amount_label: Option<String>,
    pub last_payment: bool,
    #[serde(alias = "transitionCategory")]
    pub next: TransitionCategory,
    pub divide_sa: bool,
}

impl Milestone {
    pub fn new(id: impl Into<String>, year: impl Into<String>) -> Self {
        Milestone {
            id: id.into(),
            year: Some(year.into()),
            ..Default::default()
        }
    }

    pub fn major(mut self) -> Self {
        self.major = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_amount_label(mut self, label: impl Into<String>) -> Self {
        self.amount_label = Some(label.into());
        self
    }

    pub fn with_next(mut self, next: TransitionCategory) -> Self {
        self.next = next;
        self
    }

    pub fn last_payment(mut self) -> Self {
        self.last_payment = true;
        self
    }

    pub fn divide_sa(mut self) -> Self {
        self.divide_sa = true;
        self
    }

    /// Parsed year token, if present and well-formed.
    pub fn year_token(&self) -> Option<YearToken> {
        self.year.as_deref().and_then(YearToken::parse)
    }

    pub fn is_age(&self) -> bool {
        self.year.as_deref().is_some_and(YearToken::is_age_token)
    }

    /// The callout tier, or `None` when the milestone has no callout.
    pub fn callout_level(&self) -> Option<i32> {
        self.level.filter(|&level| level >= 0)
    }
}

/// Chart family. The MC variant takes amount labels verbatim and draws a
/// slope through the callout apexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    #[default]
    Standard,
    Mc,
}

/// Which axis segments get the zigzag decoration.
///
/// Segment `i` joins milestone `i - 1` to milestone `i`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZigzagTrigger {
    /// Zigzag when the left endpoint is major.
    MajorLeft,
    /// Zigzag when the right endpoint is major.
    MajorRight,
    /// Zigzag exactly the listed segment indices.
    Indices(BTreeSet<usize>),
}

impl Default for ZigzagTrigger {
    fn default() -> Self {
        ZigzagTrigger::MajorLeft
    }
}

impl ZigzagTrigger {
    pub fn applies(&self, segment: usize, left: &Milestone, right: &Milestone) -> bool {
        match self {
            ZigzagTrigger::MajorLeft => left.major,
            ZigzagTrigger::MajorRight => right.major,
            ZigzagTrigger::Indices(set) => set.contains(&segment),
        }
    }
}

/// Header layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "i64")]
pub enum HeaderType {
    /// Type 0: centered, word-wrapped coverage statement with flanking arrows.
    #[default]
    Statement,
    /// Type 2: left message box.
    Left,
    /// Type 3: centered message box split at divide positions.
    DividedCenter,
    /// Type 4: right message box.
    Right,
    /// Type 5: plain message box split at divide positions.
    DividedPlain,
}

impl TryFrom<i64> for HeaderType {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HeaderType::Statement),
            2 => Ok(HeaderType::Left),
            3 => Ok(HeaderType::DividedCenter),
            4 => Ok(HeaderType::Right),
            5 => Ok(HeaderType::DividedPlain),
            _ => Err(ConfigError::InvalidHeaderType { value }),
        }
    }
}

impl HeaderType {
    pub fn selector(self) -> u8 {
        match self {
            HeaderType::Statement => 0,
            HeaderType::Left => 2,
            HeaderType::DividedCenter => 3,
            HeaderType::Right => 4,
            HeaderType::DividedPlain => 5,
        }
    }

    /// Types 3 and 5 split the statement at divide positions.
    pub fn uses_divides(self) -> bool {
        matches!(self, HeaderType::DividedCenter | HeaderType::DividedPlain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_token_parses_policy_and_age() {
        assert_eq!(YearToken::parse("20"), Some(YearToken::Policy(20)));
        assert_eq!(YearToken::parse("A60"), Some(YearToken::Age(60)));
        assert_eq!(YearToken::parse(" 7 "), Some(YearToken::Policy(7)));
    }

    #[test]
    fn year_token_rejects_malformed() {
        assert_eq!(YearToken::parse("A"), None);
        assert_eq!(YearToken::parse("twenty"), None);
        assert_eq!(YearToken::parse(""), None);
        assert!(YearToken::is_age_token("Axx"));
    }

    #[test]
    fn age_token_maps_to_policy_year() {
        assert_eq!(YearToken::Age(60).policy_year(35), Some(25));
        assert_eq!(YearToken::Policy(10).policy_year(35), Some(10));
        assert_eq!(YearToken::Age(i32::MIN).policy_year(1), None);
        assert_eq!(YearToken::Age(i32::MAX).policy_year(-1), None);
        assert_eq!(YearToken::display("A90"), "90");
    }

    #[test]
    fn level_minus_one_has_no_callout() {
        assert_eq!(Milestone::new("a", "1").with_level(-1).callout_level(), None);
        assert_eq!(Milestone::new("a", "1").callout_level(), None);
        assert_eq!(Milestone::new("a", "1").with_level(99).callout_level(), Some(99));
    }

    #[test]
    fn transition_category_from_integer() {
        assert_eq!(TransitionCategory::try_from(2).ok(), Some(TransitionCategory::Warp));
        assert!(matches!(
            TransitionCategory::try_from(3),
            Err(ConfigError::InvalidTransition { value: 3 })
        ));
    }

    #[test]
    fn header_type_rejects_unknown_selector() {
        assert!(matches!(
            HeaderType::try_from(1),
            Err(ConfigError::InvalidHeaderType { value: 1 })
        ));
        assert_eq!(HeaderType::try_from(5).ok(), Some(HeaderType::DividedPlain));
        assert!(HeaderType::DividedCenter.uses_divides());
        assert!(!HeaderType::Right.uses_divides());
    }

    #[test]
    fn milestone_deserializes_camel_case() {
        let m: Milestone = serde_json::from_str(
            r#"{"id":"60","isMajor":true,"year":"A60","lastPayment":true,"next":2,"divideSa":true}"#,
        )
        .unwrap();
        assert!(m.major);
        assert!(m.last_payment);
        assert!(m.divide_sa);
        assert!(m.is_age());
        assert_eq!(m.next, TransitionCategory::Warp);
    }

    #[test]
    fn zigzag_trigger_variants() {
        let left = Milestone::new("a", "1").major();
        let right = Milestone::new("b", "2");
        assert!(ZigzagTrigger::MajorLeft.applies(1, &left, &right));
        assert!(!ZigzagTrigger::MajorRight.applies(1, &left, &right));
        let indices = ZigzagTrigger::Indices([4, 5, 7].into_iter().collect());
        assert!(indices.applies(5, &right, &right));
        assert!(!indices.applies(6, &left, &left));
    }
}
