use crate::config::SourceKind;
use crate::error::ProviderError;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use super::{
    types::{RawStatements, StatementKind, PERIOD_COLUMN},
    validator::StatementValidator,
    FundamentalsSource,
};

/// Statements exported to CSV, one file per statement and ticker.
///
/// Expects `{dir}/{TICKER}_cashflow.csv` and `{dir}/{TICKER}_balance_sheet.csv`,
/// each with a `period` column and one column per line item.
pub struct CsvConnector {
    dir: PathBuf,
}

impl CsvConnector {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn statement_path(&self, ticker: &str, kind: StatementKind) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", ticker, kind.as_str()))
    }

    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame, ProviderError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProviderError::DataNotAvailable(format!(
                "No statement file at {}",
                path.display()
            )));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| ProviderError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(df)
    }

    /// Line items as `Float64`, periods newest first
    pub fn normalize(df: DataFrame) -> Result<DataFrame, ProviderError> {
        let casts: Vec<Expr> = df
            .get_column_names()
            .iter()
            .map(|name| {
                if name.as_str() == PERIOD_COLUMN {
                    col(name.as_str()).cast(DataType::String)
                } else {
                    col(name.as_str()).cast(DataType::Float64)
                }
            })
            .collect();

        let df = df
            .lazy()
            .select(casts)
            .sort(
                [PERIOD_COLUMN],
                SortMultipleOptions::default().with_order_descending(true),
            )
            .collect()?;

        Ok(df)
    }

    fn load_statement(&self, ticker: &str, kind: StatementKind) -> Result<DataFrame, ProviderError> {
        let path = self.statement_path(ticker, kind);
        log::debug!("Reading {} statement from {}", kind.as_str(), path.display());

        let df = Self::load(&path)?;
        StatementValidator::validate(&df, kind)?;
        Self::normalize(df)
    }
}

impl FundamentalsSource for CsvConnector {
    fn name(&self) -> &str {
        SourceKind::Csv.display_name()
    }

    fn fetch_statements(&self, ticker: &str) -> Result<RawStatements, ProviderError> {
        Ok(RawStatements {
            cashflow: self.load_statement(ticker, StatementKind::CashFlow)?,
            balance_sheet: self.load_statement(ticker, StatementKind::BalanceSheet)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::connectors::types::OPERATING_CASH_FLOW;
    use polars::df;

    #[test]
    fn test_normalize_sorts_and_casts() {
        let df = df! {
            PERIOD_COLUMN => &["2021-12-31", "2023-12-31", "2022-12-31"],
            OPERATING_CASH_FLOW => &[1_i64, 3, 2],
        }
        .unwrap();

        let df = CsvConnector::normalize(df).unwrap();
        let ocf = df.column(OPERATING_CASH_FLOW).unwrap().f64().unwrap();
        assert_eq!(ocf.get(0), Some(3.0));
        assert_eq!(ocf.get(2), Some(1.0));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let connector = CsvConnector::new(dir.path());
        assert!(matches!(
            connector.fetch_statements("NOPE"),
            Err(ProviderError::DataNotAvailable(_))
        ));
    }

    #[test]
    fn test_statement_path() {
        let connector = CsvConnector::new("/tmp/statements");
        assert_eq!(
            connector.statement_path("ACME", StatementKind::BalanceSheet),
            PathBuf::from("/tmp/statements/ACME_balance_sheet.csv")
        );
    }
}
