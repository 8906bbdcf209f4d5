//! Localized chart captions.
//!
//! The chart consumes localization as an opaque key -> string lookup. The
//! builtin catalog covers Thai and English; unknown language tags fall back to
//! English. A missing key yields an empty string so chart emission stays
//! best-effort.

use crate::errors::ConfigError;

pub const X_AXIS_LABEL: &str = "xAxisLabel";
pub const PREMIUM_END: &str = "premiumEnd";
pub const AT_AGE: &str = "atAge";
pub const COVERAGE: &str = "coverage";
pub const OR: &str = "or";
pub const REMARK: &str = "remark";

/// Languages with builtin tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Th,
    En,
}

impl Lang {
    /// Resolve a language tag, falling back to English.
    pub fn resolve(tag: &str) -> Lang {
        match tag.trim().to_ascii_lowercase().as_str() {
            "th" => Lang::Th,
            "en" => Lang::En,
            _ => {
                crate::log::warn!(lang = tag, "unknown language tag, using English");
                Lang::En
            }
        }
    }
}

/// Key/value view over one language's strings.
#[derive(Debug, Clone, Copy)]
pub struct Texts<'a> {
    lang: Lang,
    entries: &'a [(&'a str, &'a str)],
}

impl<'a> Texts<'a> {
    pub fn new(lang: Lang, entries: &'a [(&'a str, &'a str)]) -> Self {
        Texts { lang, entries }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Look up `key`; missing keys give `""`.
    pub fn get(&self, key: &str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }
}

/// Localization collaborator.
pub trait Localization {
    fn texts(&self, lang: &str) -> Texts<'_>;
}

static TH: &[(&str, &str)] = &[
    (X_AXIS_LABEL, "สิ้นปีกรมธรรม์ที่"),
    (PREMIUM_END, "ชำระเบี้ยครบ"),
    (AT_AGE, "ครบอายุ"),
    (
        COVERAGE,
        "ความคุ้มครองชีวิต : จำนวนที่มากกว่าระหว่าง 100% ของทุนประกันภัย",
    ),
    (OR, "หรือ มูลค่าเวนคืนเงินสด หรือ เบี้ยประกันภัยสะสม"),
    (REMARK, "หมายเหตุ"),
];

static EN: &[(&str, &str)] = &[
    (X_AXIS_LABEL, "End of Year"),
    (PREMIUM_END, "Premium Payment Finished"),
    (AT_AGE, "At age"),
    (COVERAGE, "Death coverage*"),
    (OR, "or Cash Value or Accumulated Premium"),
    (REMARK, "Remark"),
];

/// Builtin Thai/English tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl Localization for BuiltinCatalog {
    fn texts(&self, lang: &str) -> Texts<'_> {
        match Lang::resolve(lang) {
            Lang::Th => Texts::new(Lang::Th, TH),
            Lang::En => Texts::new(Lang::En, EN),
        }
    }
}

// ============================================================================
// Sum-assured statements
// ============================================================================

/// Values substituted into a sum-assured template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaSubstitution {
    pub formatted_amount: String,
}

/// A bilingual statement with an `{amount}` placeholder.
#[derive(Debug, Clone, Copy)]
pub struct SaTemplate {
    pub th: &'static str,
    pub en: &'static str,
}

impl SaTemplate {
    const AMOUNT: &'static str = "{amount}";

    pub fn text(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Th => self.th,
            Lang::En => self.en,
        }
    }

    pub fn render(&self, lang: Lang, sub: &SaSubstitution) -> String {
        self.text(lang).replace(Self::AMOUNT, &sub.formatted_amount)
    }
}

pub static SA_TEMPLATES: [SaTemplate; 3] = [
    SaTemplate {
        th: "ความคุ้มครองชีวิต : จำนวนที่มากกว่าระหว่าง 100% ของทุนประกันภัย ({amount} บาท) หรือ มูลค่าเวนคืนเงินสด หรือ เบี้ยประกันภัยสะสม",
        en: "Death coverage*: the greater of 100% of sum assured ({amount} Baht) or Cash Value or Accumulated Premium",
    },
    SaTemplate {
        th: "ความคุ้มครองชีวิต : {amount} บาท",
        en: "Death coverage*: {amount} Baht",
    },
    SaTemplate {
        th: "ความคุ้มครองชีวิต : จำนวนที่มากกว่าระหว่าง {amount} บาท หรือ มูลค่าเวนคืนเงินสด",
        en: "Death coverage*: the greater of {amount} Baht or Cash Value",
    },
];

pub fn sa_template(index: usize) -> Result<&'static SaTemplate, ConfigError> {
    SA_TEMPLATES.get(index).ok_or(ConfigError::UnknownTemplate {
        index,
        count: SA_TEMPLATES.len(),
    })
}

/// The coverage statement shown in the header.
///
/// With a sum assured, the indexed template is filled in; otherwise the
/// generic `coverage` and `or` strings are joined.
pub fn coverage_statement(
    texts: &Texts<'_>,
    sum_assured: Option<&SaSubstitution>,
    template: usize,
) -> Result<String, ConfigError> {
    match sum_assured {
        Some(sub) => Ok(sa_template(template)?.render(texts.lang(), sub)),
        None => {
            let coverage = texts.get(COVERAGE);
            let or = texts.get(OR);
            Ok(match (coverage.is_empty(), or.is_empty()) {
                (false, false) => format!("{coverage} {or}"),
                (false, true) => coverage.to_string(),
                _ => or.to_string(),
            })
        }
    }
}
