use crate::config::{AppConfig, DataConfig, ValuationConfig};
use crate::ui::state::AppState;

pub struct ConfigBridge;

impl ConfigBridge {
    /// Convert AppState to ValuationConfig
    pub fn to_valuation_config(state: &AppState) -> ValuationConfig {
        ValuationConfig {
            terminal_growth: state.terminal_growth,
            horizon_years: state.horizon_years,
            trailing_periods: state.trailing_periods,
            growth_rates: state.growth_rates.clone(),
            discount_rates: state.discount_rates.clone(),
        }
    }

    /// Convert AppState to DataConfig; connection settings come from `base`
    pub fn to_data_config(state: &AppState, base: &DataConfig) -> DataConfig {
        DataConfig {
            source: state.source,
            csv_dir: state.csv_dir.clone(),
            ..base.clone()
        }
    }

    /// Write the editable parts of the UI back into `config`
    pub fn apply(state: &AppState, config: &mut AppConfig) {
        config.valuation = Self::to_valuation_config(state);
        config.data = Self::to_data_config(state, &config.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;

    #[test]
    fn test_state_round_trips_through_config() {
        let mut config = AppConfig::default();
        config.data.timeout_ms = 2_500;

        let mut state = AppState::from_config(&config);
        state.horizon_years = 8;
        state.source = SourceKind::Csv;
        state.discount_rates = vec![0.09];

        ConfigBridge::apply(&state, &mut config);
        assert_eq!(config.valuation.horizon_years, 8);
        assert_eq!(config.valuation.discount_rates, vec![0.09]);
        assert_eq!(config.data.source, SourceKind::Csv);
        assert_eq!(config.data.timeout_ms, 2_500);
    }
}
