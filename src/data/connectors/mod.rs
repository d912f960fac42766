mod csv;
mod types;
mod validator;
mod yahoo;

pub use csv::CsvConnector;
pub use types::{
    RawStatements,
    StatementBuilder,
    StatementKind,
    CAPITAL_EXPENDITURE,
    CASH_KEYS,
    DEBT_KEYS,
    OPERATING_CASH_FLOW,
    PERIOD_COLUMN,
    SHARES_KEYS,
};
pub use validator::StatementValidator;
pub use yahoo::YahooConnector;

use crate::config::{DataConfig, SourceKind};
use crate::error::ProviderError;

/// A provider of financial statements for a ticker
pub trait FundamentalsSource: Send + Sync {
    /// Human readable source name, used in error messages
    fn name(&self) -> &str;

    /// Cash-flow statement and balance sheet, newest period first
    fn fetch_statements(&self, ticker: &str) -> Result<RawStatements, ProviderError>;
}

/// Build the connector selected in the configuration
pub fn from_config(config: &DataConfig) -> Result<Box<dyn FundamentalsSource>, ProviderError> {
    match config.source {
        SourceKind::Yahoo => Ok(Box::new(YahooConnector::new(config)?)),
        SourceKind::Csv => Ok(Box::new(CsvConnector::new(&config.csv_dir))),
    }
}
