//! Benefit lookup tables.
//!
//! A quotation carries up to four independently sorted lists of
//! `endYear -> (cash benefit, coverage)` records. Lookups walk the lists in
//! priority order and the first list holding the year wins.

use serde::Deserialize;

use crate::errors::ConfigError;

/// Maximum number of priority lists in a table.
pub const MAX_LISTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitRecord {
    pub end_year: i32,
    pub cash_benefit: f64,
    #[serde(default)]
    pub coverage: f64,
}

impl BenefitRecord {
    pub fn new(end_year: i32, cash_benefit: f64, coverage: f64) -> Self {
        BenefitRecord {
            end_year,
            cash_benefit,
            coverage,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Vec<BenefitRecord>>")]
pub struct BenefitTable {
    lists: Vec<Vec<BenefitRecord>>,
}

impl BenefitTable {
    pub fn new(lists: Vec<Vec<BenefitRecord>>) -> Result<Self, ConfigError> {
        if lists.len() > MAX_LISTS {
            return Err(ConfigError::TooManyBenefitLists {
                count: lists.len(),
                max: MAX_LISTS,
            });
        }
        let lists = lists
            .into_iter()
            .map(|mut list| {
                list.sort_by_key(|record| record.end_year);
                list
            })
            .collect();
        Ok(BenefitTable { lists })
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// First record for `year`, searching lists in priority order.
    pub fn lookup(&self, year: i32) -> Option<&BenefitRecord> {
        self.lists.iter().find_map(|list| {
            list.binary_search_by_key(&year, |record| record.end_year)
                .ok()
                .map(|i| &list[i])
        })
    }
}

impl TryFrom<Vec<Vec<BenefitRecord>>> for BenefitTable {
    type Error = ConfigError;

    fn try_from(lists: Vec<Vec<BenefitRecord>>) -> Result<Self, Self::Error> {
        BenefitTable::new(lists)
    }
}

/// Format an amount as a grouped integer: `1234567.5` becomes `1,234,568`.
///
/// Rounds half away from zero; the separator is always `,` regardless of
/// locale.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_respects_priority_order() {
        let table = BenefitTable::new(vec![
            vec![BenefitRecord::new(10, 1_000.0, 0.0)],
            vec![
                BenefitRecord::new(10, 9_999.0, 0.0),
                BenefitRecord::new(20, 2_000.0, 0.0),
            ],
        ])
        .unwrap();

        assert_eq!(table.lookup(10).map(|r| r.cash_benefit), Some(1_000.0));
        assert_eq!(table.lookup(20).map(|r| r.cash_benefit), Some(2_000.0));
        assert_eq!(table.lookup(30), None);
    }

    #[test]
    fn lists_are_sorted_on_construction() {
        let table = BenefitTable::new(vec![vec![
            BenefitRecord::new(30, 3.0, 0.0),
            BenefitRecord::new(5, 1.0, 0.0),
            BenefitRecord::new(15, 2.0, 0.0),
        ]])
        .unwrap();
        assert_eq!(table.lookup(5).map(|r| r.cash_benefit), Some(1.0));
        assert_eq!(table.lookup(15).map(|r| r.cash_benefit), Some(2.0));
    }

    #[test]
    fn more_than_four_lists_is_rejected() {
        let err = BenefitTable::new(vec![Vec::new(); 5]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TooManyBenefitLists { count: 5, max: 4 }
        ));
    }

    #[test]
    fn table_deserializes_from_nested_arrays() {
        let table: BenefitTable = serde_json::from_str(
            r#"[[{"endYear":1,"cashBenefit":500,"coverage":100000}],[]]"#,
        )
        .unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.lookup(1).map(|r| r.coverage), Some(100_000.0));
    }

    #[test]
    fn format_grouped_inserts_separators() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1_000.0), "1,000");
        assert_eq!(format_grouped(150_000.0), "150,000");
        assert_eq!(format_grouped(1_234_567.5), "1,234,568");
        assert_eq!(format_grouped(-2_500.4), "-2,500");
    }
}
