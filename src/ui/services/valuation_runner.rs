use crate::config::{ConfigSection, DataConfig, ValuationConfig};
use crate::data::connectors;
use crate::data::fetch_fundamentals;
use crate::engines::valuation::{valuation_breakdown, SensitivityMatrix, SweepBase};
use crate::error::{DataFetchError, DcfError};
use crate::ui::state::{BaseCase, ValuationDisplay};
use std::thread::{self, JoinHandle};

/// Result from a valuation run
pub type ValuationResult = Result<ValuationDisplay, DcfError>;

pub struct ValuationRunner {
    ticker: String,
    handle: Option<JoinHandle<ValuationResult>>,
}

impl ValuationRunner {
    /// Start fetching and valuing `ticker` in a background thread
    pub fn start(
        ticker: String,
        valuation_config: ValuationConfig,
        data_config: DataConfig,
    ) -> Result<Self, DcfError> {
        let thread_ticker = ticker.clone();
        let handle = thread::Builder::new()
            .name(format!("valuation-{}", ticker))
            .spawn(move || run_valuation(&thread_ticker, &valuation_config, &data_config))?;

        Ok(Self {
            ticker,
            handle: Some(handle),
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Check if the run is complete and take its result
    pub fn try_get_result(&mut self) -> Option<ValuationResult> {
        let handle = self.handle.take()?;
        if handle.is_finished() {
            match handle.join() {
                Ok(result) => Some(result),
                Err(_) => Some(Err(DcfError::InvalidInput(format!(
                    "Valuation thread for {} panicked",
                    self.ticker
                )))),
            }
        } else {
            // Not finished yet, put handle back
            self.handle = Some(handle);
            None
        }
    }
}

/// Fetch fundamentals and build the sensitivity matrix, synchronously
pub fn run_valuation(
    ticker: &str,
    valuation_config: &ValuationConfig,
    data_config: &DataConfig,
) -> ValuationResult {
    valuation_config.validate()?;
    data_config.validate()?;

    let source = connectors::from_config(data_config).map_err(|cause| DataFetchError {
        ticker: ticker.trim().to_uppercase(),
        source_name: data_config.source.display_name().to_string(),
        cause,
    })?;

    let snapshot = fetch_fundamentals(source.as_ref(), ticker, valuation_config.trailing_periods)?;

    let base = snapshot.sweep_base(valuation_config.terminal_growth, valuation_config.horizon_years);
    let matrix = SensitivityMatrix::build(
        &base,
        &valuation_config.growth_rates,
        &valuation_config.discount_rates,
    )?;

    let base_case = base_case(&base, &valuation_config.growth_rates, &valuation_config.discount_rates);

    Ok(ValuationDisplay {
        snapshot,
        matrix,
        terminal_growth: valuation_config.terminal_growth,
        horizon_years: valuation_config.horizon_years,
        base_case,
    })
}

fn base_case(base: &SweepBase, growth_rates: &[f64], discount_rates: &[f64]) -> Option<BaseCase> {
    let growth_rate = *growth_rates.get(growth_rates.len() / 2)?;
    let discount_rate = *discount_rates.get(discount_rates.len() / 2)?;
    let breakdown = valuation_breakdown(&base.inputs(growth_rate, discount_rate)).ok()?;
    Some(BaseCase {
        growth_rate,
        discount_rate,
        breakdown,
    })
}
