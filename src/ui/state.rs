use crate::config::{AppConfig, SourceKind};
use crate::data::FundamentalsSnapshot;
use crate::engines::valuation::SensitivityMatrix;
use crate::types::ValuationBreakdown;
use std::path::PathBuf;

/// Central application state for the UI
pub struct AppState {
    // Ticker & Data Source
    pub ticker_input: String,
    pub source: SourceKind,
    pub csv_dir: PathBuf,

    // Valuation Assumptions
    pub terminal_growth: f64,
    pub horizon_years: u32,
    pub trailing_periods: usize,
    pub growth_rates: Vec<f64>,
    pub discount_rates: Vec<f64>,

    // Execution State
    pub run_requested: bool,
    pub is_running: bool,
    pub status_message: String,
    pub last_error: Option<String>,

    // Results
    pub result: Option<ValuationDisplay>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            ticker_input: String::new(),
            source: config.data.source,
            csv_dir: config.data.csv_dir.clone(),

            terminal_growth: config.valuation.terminal_growth,
            horizon_years: config.valuation.horizon_years,
            trailing_periods: config.valuation.trailing_periods,
            growth_rates: config.valuation.growth_rates.clone(),
            discount_rates: config.valuation.discount_rates.clone(),

            run_requested: false,
            is_running: false,
            status_message: "Enter a ticker to estimate its intrinsic value".to_string(),
            last_error: None,

            result: None,
        }
    }
}

/// One finished valuation, as shown in the central panel
#[derive(Clone, Debug)]
pub struct ValuationDisplay {
    pub snapshot: FundamentalsSnapshot,
    pub matrix: SensitivityMatrix,
    pub terminal_growth: f64,
    pub horizon_years: u32,
    /// Step-by-step valuation at the middle of both rate axes, when defined
    pub base_case: Option<BaseCase>,
}

#[derive(Clone, Debug)]
pub struct BaseCase {
    pub growth_rate: f64,
    pub discount_rate: f64,
    pub breakdown: ValuationBreakdown,
}
