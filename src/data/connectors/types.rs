use polars::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Fiscal period end date column, ISO formatted, present in every statement frame
pub const PERIOD_COLUMN: &str = "period";

pub const OPERATING_CASH_FLOW: &str = "Operating Cash Flow";
pub const CAPITAL_EXPENDITURE: &str = "Capital Expenditure";

/// Ordered cash line item candidates, most specific first
pub const CASH_KEYS: [&str; 3] = [
    "Cash",
    "Cash And Cash Equivalents",
    "Cash And Short Term Investments",
];

pub const DEBT_KEYS: [&str; 3] = [
    "Total Debt",
    "Short Long Term Debt Total",
    "Long Term Debt",
];

pub const SHARES_KEYS: [&str; 3] = [
    "Shares Outstanding",
    "Ordinary Shares Number",
    "Share Issued",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    CashFlow,
    BalanceSheet,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CashFlow => "cashflow",
            Self::BalanceSheet => "balance_sheet",
        }
    }

    /// Columns a statement of this kind cannot do without
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::CashFlow => &[OPERATING_CASH_FLOW, CAPITAL_EXPENDITURE],
            Self::BalanceSheet => &[],
        }
    }
}

/// Statements as fetched from a source.
///
/// One row per fiscal period, newest first; one `Float64` column per line item
/// plus the `period` column. Line items the source did not report are absent.
#[derive(Debug, Clone)]
pub struct RawStatements {
    pub cashflow: DataFrame,
    pub balance_sheet: DataFrame,
}

/// Collects `(period, line item, value)` triples into a statement frame
#[derive(Debug, Default)]
pub struct StatementBuilder {
    periods: BTreeMap<String, BTreeMap<String, f64>>,
    items: BTreeSet<String>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, period: &str, item: &str, value: f64) {
        self.items.insert(item.to_string());
        self.periods
            .entry(period.to_string())
            .or_default()
            .insert(item.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn finish(self) -> PolarsResult<DataFrame> {
        let periods: Vec<&String> = self.periods.keys().rev().collect();

        let mut columns: Vec<Column> = Vec::with_capacity(self.items.len() + 1);
        columns.push(Column::new(
            PERIOD_COLUMN.into(),
            periods.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        ));

        for item in &self.items {
            let values: Vec<Option<f64>> = periods
                .iter()
                .map(|p| self.periods[*p].get(item).copied())
                .collect();
            columns.push(Column::new(item.as_str().into(), values));
        }

        DataFrame::new(columns)
    }
}
