use serde::{Deserialize, Serialize};

pub const DEFAULT_TERMINAL_GROWTH: f64 = 0.02;
pub const DEFAULT_HORIZON_YEARS: u32 = 5;
/// Longest projection horizon accepted by the engine and config
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Everything the DCF formula needs for a single valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    pub avg_fcf: f64,
    pub shares_outstanding: Option<u64>,
    pub net_debt: f64,
    pub growth_rate: f64,
    pub discount_rate: f64,
    pub terminal_growth: f64,
    pub horizon_years: u32,
}

impl ValuationInputs {
    /// Inputs with the default terminal growth (2%) and a 5 period horizon
    pub fn new(
        avg_fcf: f64,
        shares_outstanding: Option<u64>,
        net_debt: f64,
        growth_rate: f64,
        discount_rate: f64,
    ) -> Self {
        Self {
            avg_fcf,
            shares_outstanding,
            net_debt,
            growth_rate,
            discount_rate,
            terminal_growth: DEFAULT_TERMINAL_GROWTH,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }

    pub fn with_terminal_growth(mut self, terminal_growth: f64) -> Self {
        self.terminal_growth = terminal_growth;
        self
    }

    pub fn with_horizon(mut self, horizon_years: u32) -> Self {
        self.horizon_years = horizon_years;
        self
    }
}

/// Intermediate values of one valuation, shown next to the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    pub discounted_flows: Vec<f64>,
    pub terminal_value: f64,
    pub terminal_value_pv: f64,
    pub enterprise_value: f64,
    pub equity_value: f64,
    pub per_share: f64,
}

/// Format a fractional rate as a percentage label: 0.08 -> "8%", 0.085 -> "8.5%"
pub fn rate_label(rate: f64) -> String {
    let pct = format!("{:.2}", rate * 100.0);
    let trimmed = pct.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{}%", trimmed)
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
