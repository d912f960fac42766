use super::traits::ConfigSection;
use crate::error::DcfError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Yahoo,
    Csv,
}

impl SourceKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::Yahoo => "Yahoo Finance",
            SourceKind::Csv => "CSV statements",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: SourceKind,
    /// Folder holding `{TICKER}_cashflow.csv` and `{TICKER}_balance_sheet.csv`
    pub csv_dir: PathBuf,
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Yahoo,
            csv_dir: PathBuf::from("statements"),
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout_ms: 10_000,
            user_agent: concat!("dcfview/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), DcfError> {
        if self.timeout_ms == 0 {
            return Err(DcfError::Configuration(
                "Request timeout must be positive".to_string()
            ));
        }
        if self.source == SourceKind::Yahoo
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(DcfError::Configuration(format!(
                "Base URL must be http(s): {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(SourceKind::Yahoo.display_name(), "Yahoo Finance");
        assert_eq!(SourceKind::Csv.display_name(), "CSV statements");
    }
}
