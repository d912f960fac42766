use super::types::{RawStatements, StatementBuilder, StatementKind};
use super::validator::StatementValidator;
use super::FundamentalsSource;
use crate::config::{DataConfig, SourceKind};
use crate::error::ProviderError;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Yahoo annual time series and the statement line item each one feeds
const SERIES: [(&str, &str, StatementKind); 8] = [
    ("annualOperatingCashFlow", "Operating Cash Flow", StatementKind::CashFlow),
    ("annualCapitalExpenditure", "Capital Expenditure", StatementKind::CashFlow),
    ("annualCashAndCashEquivalents", "Cash And Cash Equivalents", StatementKind::BalanceSheet),
    (
        "annualCashCashEquivalentsAndShortTermInvestments",
        "Cash And Short Term Investments",
        StatementKind::BalanceSheet,
    ),
    ("annualTotalDebt", "Total Debt", StatementKind::BalanceSheet),
    ("annualLongTermDebt", "Long Term Debt", StatementKind::BalanceSheet),
    ("annualOrdinarySharesNumber", "Ordinary Shares Number", StatementKind::BalanceSheet),
    ("annualShareIssued", "Share Issued", StatementKind::BalanceSheet),
];

/// Start of the requested window, early enough to cover every reported year
const PERIOD_START: i64 = 493_590_046;

#[derive(Debug, Deserialize)]
struct Envelope {
    timeseries: Timeseries,
}

#[derive(Debug, Deserialize)]
struct Timeseries {
    result: Option<Vec<Value>>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(rename = "type")]
    series: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(rename = "asOfDate")]
    as_of_date: String,
    #[serde(rename = "reportedValue")]
    reported_value: ReportedValue,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    raw: f64,
}

/// Fundamentals from the Yahoo Finance time series endpoint
pub struct YahooConnector {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooConnector {
    pub fn new(config: &DataConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, ticker: &str) -> String {
        let types: Vec<&str> = SERIES.iter().map(|(name, _, _)| *name).collect();
        format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}?symbol={}&type={}&period1={}&period2={}",
            self.base_url,
            ticker,
            ticker,
            types.join(","),
            PERIOD_START,
            chrono::Utc::now().timestamp()
        )
    }

    /// Turn a time series response body into statement frames
    pub fn parse_response(body: &str) -> Result<RawStatements, ProviderError> {
        let envelope: Envelope =
            serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        if let Some(error) = envelope.timeseries.error.filter(|e| !e.is_null()) {
            return Err(ProviderError::DataNotAvailable(error.to_string()));
        }

        let mut cashflow = StatementBuilder::new();
        let mut balance_sheet = StatementBuilder::new();

        for result in envelope.timeseries.result.iter().flatten() {
            let Some(meta) = result.get("meta") else { continue };
            let meta: Meta = serde_json::from_value(meta.clone())
                .map_err(|e| ProviderError::Parse(format!("bad meta: {}", e)))?;

            for series in &meta.series {
                let Some((_, item, kind)) = SERIES.iter().find(|(name, _, _)| *name == series.as_str()) else {
                    log::debug!("Ignoring unrequested series {}", series);
                    continue;
                };
                let Some(observations) = result.get(series.as_str()).and_then(Value::as_array) else {
                    continue;
                };

                let builder = match kind {
                    StatementKind::CashFlow => &mut cashflow,
                    StatementKind::BalanceSheet => &mut balance_sheet,
                };

                // Yahoo pads missing years with nulls
                for observation in observations.iter().filter(|o| !o.is_null()) {
                    let observation: Observation = serde_json::from_value(observation.clone())
                        .map_err(|e| ProviderError::Parse(format!("bad {} entry: {}", series, e)))?;
                    builder.insert(&observation.as_of_date, item, observation.reported_value.raw);
                }
            }
        }

        if cashflow.is_empty() && balance_sheet.is_empty() {
            return Err(ProviderError::DataNotAvailable(
                "no fundamentals reported".to_string(),
            ));
        }

        Ok(RawStatements {
            cashflow: cashflow.finish()?,
            balance_sheet: balance_sheet.finish()?,
        })
    }
}

impl FundamentalsSource for YahooConnector {
    fn name(&self) -> &str {
        SourceKind::Yahoo.display_name()
    }

    fn fetch_statements(&self, ticker: &str) -> Result<RawStatements, ProviderError> {
        let url = self.url(ticker);
        log::debug!("GET {}", url);

        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        let statements = Self::parse_response(&body)?;

        StatementValidator::validate(&statements.cashflow, StatementKind::CashFlow)?;
        StatementValidator::validate(&statements.balance_sheet, StatementKind::BalanceSheet)?;
        Ok(statements)
    }
}
