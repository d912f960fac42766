use super::connectors::{
    FundamentalsSource, RawStatements, CAPITAL_EXPENDITURE, CASH_KEYS, DEBT_KEYS,
    OPERATING_CASH_FLOW, SHARES_KEYS,
};
use super::lookup::{lookup_first, LineItem};
use crate::engines::valuation::SweepBase;
use crate::error::{DataFetchError, ProviderError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything the valuation needs, distilled from one ticker's statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsSnapshot {
    pub ticker: String,
    pub source_name: String,
    pub avg_fcf: f64,
    /// Number of periods that went into `avg_fcf`
    pub fcf_periods: usize,
    pub total_debt: LineItem,
    pub cash: LineItem,
    pub net_debt: f64,
    pub shares_outstanding: Option<u64>,
    pub shares_item: Option<String>,
}

impl FundamentalsSnapshot {
    /// Distill statements into valuation inputs
    pub fn from_statements(
        ticker: &str,
        source_name: &str,
        statements: &RawStatements,
        trailing_periods: usize,
    ) -> Result<Self, ProviderError> {
        let (avg_fcf, fcf_periods) = trailing_average_fcf(&statements.cashflow, trailing_periods)?;

        let cash = lookup_first(&statements.balance_sheet, &CASH_KEYS);
        let total_debt = lookup_first(&statements.balance_sheet, &DEBT_KEYS);
        let shares = lookup_first(&statements.balance_sheet, &SHARES_KEYS);

        let shares_outstanding = (shares.value.is_finite() && shares.value >= 1.0)
            .then(|| shares.value.round() as u64);

        Ok(Self {
            ticker: ticker.to_string(),
            source_name: source_name.to_string(),
            avg_fcf,
            fcf_periods,
            net_debt: total_debt.value - cash.value,
            total_debt,
            cash,
            shares_outstanding,
            shares_item: shares.matched,
        })
    }

    /// Fixed part of the sensitivity sweep
    pub fn sweep_base(&self, terminal_growth: f64, horizon_years: u32) -> SweepBase {
        SweepBase {
            avg_fcf: self.avg_fcf,
            shares_outstanding: self.shares_outstanding,
            net_debt: self.net_debt,
            terminal_growth,
            horizon_years,
        }
    }
}

/// Mean free cash flow over the newest `periods` complete periods.
///
/// FCF is operating cash flow plus capital expenditure (reported negative).
/// Periods missing either figure are skipped. Returns the mean and the number
/// of periods averaged.
pub fn trailing_average_fcf(cashflow: &DataFrame, periods: usize) -> Result<(f64, usize), ProviderError> {
    for required in [OPERATING_CASH_FLOW, CAPITAL_EXPENDITURE] {
        if cashflow.column(required).is_err() {
            return Err(ProviderError::DataNotAvailable(format!(
                "Missing line item '{}' in cashflow statement",
                required
            )));
        }
    }

    let fcf = cashflow
        .clone()
        .lazy()
        .select([(col(OPERATING_CASH_FLOW).cast(DataType::Float64)
            + col(CAPITAL_EXPENDITURE).cast(DataType::Float64))
        .alias("fcf")])
        .filter(col("fcf").is_not_null())
        .limit(periods as IdxSize)
        .collect()?;

    let fcf = fcf.column("fcf")?.f64()?;
    match fcf.mean() {
        Some(mean) if fcf.len() > 0 => Ok((mean, fcf.len())),
        _ => Err(ProviderError::DataNotAvailable(
            "no period reports both operating cash flow and capital expenditure".to_string(),
        )),
    }
}

/// Trim and upper-case a free-text ticker
pub fn normalize_ticker(raw: &str) -> Result<String, ProviderError> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() || ticker.chars().any(char::is_whitespace) {
        return Err(ProviderError::InvalidTicker(raw.to_string()));
    }
    Ok(ticker)
}

/// Fetch statements for `ticker` and distill them.
///
/// Every failure, from ticker parsing to the FCF average, comes back as a
/// [`DataFetchError`] naming the ticker and the source.
pub fn fetch_fundamentals(
    source: &dyn FundamentalsSource,
    ticker: &str,
    trailing_periods: usize,
) -> Result<FundamentalsSnapshot, DataFetchError> {
    let wrap = |cause: ProviderError| DataFetchError {
        ticker: ticker.trim().to_uppercase(),
        source_name: source.name().to_string(),
        cause,
    };

    let ticker = normalize_ticker(ticker).map_err(wrap)?;
    log::info!("Fetching fundamentals for {} from {}", ticker, source.name());

    let statements = source.fetch_statements(&ticker).map_err(wrap)?;
    let snapshot = FundamentalsSnapshot::from_statements(&ticker, source.name(), &statements, trailing_periods)
        .map_err(wrap)?;

    log::info!(
        "{}: avg FCF {:.0} over {} periods, net debt {:.0}, shares {:?}",
        ticker,
        snapshot.avg_fcf,
        snapshot.fcf_periods,
        snapshot.net_debt,
        snapshot.shares_outstanding
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::connectors::PERIOD_COLUMN;
    use polars::df;

    #[test]
    fn test_trailing_average_skips_incomplete_periods() {
        let cashflow = df! {
            PERIOD_COLUMN => &["2024", "2023", "2022"],
            OPERATING_CASH_FLOW => &[Some(100.0), Some(90.0), Some(80.0)],
            CAPITAL_EXPENDITURE => &[Some(-20.0), None, Some(-10.0)],
        }
        .unwrap();

        let (avg, n) = trailing_average_fcf(&cashflow, 5).unwrap();
        assert_eq!(n, 2);
        assert_eq!(avg, 75.0);
    }

    #[test]
    fn test_trailing_average_takes_newest() {
        let cashflow = df! {
            PERIOD_COLUMN => &["2024", "2023", "2022"],
            OPERATING_CASH_FLOW => &[10.0, 20.0, 90.0],
            CAPITAL_EXPENDITURE => &[0.0, 0.0, 0.0],
        }
        .unwrap();

        assert_eq!(trailing_average_fcf(&cashflow, 2).unwrap(), (15.0, 2));
    }

    #[test]
    fn test_trailing_average_without_data() {
        let cashflow = df! {
            PERIOD_COLUMN => &["2024"],
            OPERATING_CASH_FLOW => &[Some(10.0)],
            CAPITAL_EXPENDITURE => &[None::<f64>],
        }
        .unwrap();
        assert!(trailing_average_fcf(&cashflow, 5).is_err());

        let missing = df! { PERIOD_COLUMN => &["2024"] }.unwrap();
        assert!(matches!(
            trailing_average_fcf(&missing, 5),
            Err(ProviderError::DataNotAvailable(_))
        ));
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  aapl ").unwrap(), "AAPL");
        assert_eq!(normalize_ticker("brk-b").unwrap(), "BRK-B");
        assert!(normalize_ticker("   ").is_err());
        assert!(normalize_ticker("AA PL").is_err());
    }
}
