use super::traits::ConfigSection;
use crate::error::DcfError;
use crate::types::{rate_label, DEFAULT_HORIZON_YEARS, DEFAULT_TERMINAL_GROWTH, MAX_HORIZON_YEARS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    pub terminal_growth: f64,
    pub horizon_years: u32,
    /// How many of the newest fiscal periods feed the FCF average
    pub trailing_periods: usize,
    pub growth_rates: Vec<f64>,
    pub discount_rates: Vec<f64>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            terminal_growth: DEFAULT_TERMINAL_GROWTH,
            horizon_years: DEFAULT_HORIZON_YEARS,
            trailing_periods: 5,
            growth_rates: vec![0.06, 0.08, 0.10, 0.12],
            discount_rates: vec![0.08, 0.09, 0.10, 0.11],
        }
    }
}

impl ConfigSection for ValuationConfig {
    fn section_name() -> &'static str {
        "valuation"
    }

    fn validate(&self) -> Result<(), DcfError> {
        if !self.terminal_growth.is_finite() {
            return Err(DcfError::Configuration(
                "Terminal growth must be a finite number".to_string()
            ));
        }
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(DcfError::Configuration(format!(
                "Projection horizon must be between 1 and {} periods",
                MAX_HORIZON_YEARS
            )));
        }
        if self.trailing_periods == 0 {
            return Err(DcfError::Configuration(
                "Trailing periods must be at least 1".to_string()
            ));
        }
        for (name, rates) in [("growth_rates", &self.growth_rates), ("discount_rates", &self.discount_rates)] {
            if rates.is_empty() {
                return Err(DcfError::Configuration(format!("{} must not be empty", name)));
            }
            if rates.iter().any(|r| !r.is_finite()) {
                return Err(DcfError::Configuration(format!("{} must be finite", name)));
            }
            let labels: Vec<String> = rates.iter().map(|&r| rate_label(r)).collect();
            if let Some(dup) = labels.iter().enumerate().find(|&(i, l)| labels[..i].contains(l)) {
                return Err(DcfError::Configuration(format!(
                    "{} lists {} more than once",
                    name, dup.1
                )));
            }
        }
        Ok(())
    }
}
