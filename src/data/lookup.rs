use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of a best-effort line item lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub value: f64,
    /// Candidate that supplied the value; `None` means the zero fallback was used
    pub matched: Option<String>,
}

impl LineItem {
    pub fn fallback() -> Self {
        Self {
            value: 0.0,
            matched: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

/// Newest-period value of the first candidate column that has one.
///
/// Walks `candidates` in order and returns the first line item present in
/// `statement` with a non-null value in row 0 (the newest period). When none
/// qualifies the value is `0.0`. This is a deliberate approximation: an absent
/// cash or debt line is treated as zero instead of failing the valuation.
pub fn lookup_first(statement: &DataFrame, candidates: &[&str]) -> LineItem {
    for &candidate in candidates {
        let Ok(column) = statement.column(candidate) else {
            continue;
        };
        let value = column
            .cast(&DataType::Float64)
            .ok()
            .and_then(|c| c.f64().ok().and_then(|ca| ca.get(0)))
            .filter(|v| v.is_finite());

        if let Some(value) = value {
            return LineItem {
                value,
                matched: Some(candidate.to_string()),
            };
        }
        log::debug!("Line item '{}' present but empty for the newest period", candidate);
    }

    log::warn!("None of {:?} reported, assuming 0", candidates);
    LineItem::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::connectors::{CASH_KEYS, DEBT_KEYS, PERIOD_COLUMN};
    use polars::df;

    fn balance_sheet() -> DataFrame {
        df! {
            PERIOD_COLUMN => &["2023-12-31", "2022-12-31"],
            "Cash And Cash Equivalents" => &[Some(50.0), Some(40.0)],
            "Cash And Short Term Investments" => &[Some(80.0), Some(70.0)],
            "Total Debt" => &[None, Some(300.0)],
            "Long Term Debt" => &[Some(250.0), Some(260.0)],
        }
        .unwrap()
    }

    #[test]
    fn test_first_present_candidate_wins() {
        let cash = lookup_first(&balance_sheet(), &CASH_KEYS);
        assert_eq!(cash.value, 50.0);
        assert_eq!(cash.matched.as_deref(), Some("Cash And Cash Equivalents"));
    }

    #[test]
    fn test_null_newest_value_falls_through() {
        let debt = lookup_first(&balance_sheet(), &DEBT_KEYS);
        assert_eq!(debt.value, 250.0);
        assert_eq!(debt.matched.as_deref(), Some("Long Term Debt"));
    }

    #[test]
    fn test_no_candidate_defaults_to_zero() {
        let item = lookup_first(&balance_sheet(), &["Goodwill"]);
        assert_eq!(item, LineItem::fallback());
        assert!(item.is_fallback());
    }

    #[test]
    fn test_empty_statement_defaults_to_zero() {
        let df = df! { PERIOD_COLUMN => Vec::<String>::new() }.unwrap();
        assert!(lookup_first(&df, &CASH_KEYS).is_fallback());
    }
}
