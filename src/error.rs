use thiserror::Error;

#[derive(Error, Debug)]
pub enum DcfError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Discount rate {discount_rate} must exceed terminal growth {terminal_growth}")]
    DegenerateRates { discount_rate: f64, terminal_growth: f64 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    DataFetch(#[from] DataFetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, DcfError>;

/// Failures raised by a fundamentals source.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Data not available: {0}")]
    DataNotAvailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        match (e.status(), e.url()) {
            (Some(status), Some(url)) => Self::Http {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ if e.is_decode() => Self::Parse(e.to_string()),
            _ => Self::Network(e.to_string()),
        }
    }
}

impl From<polars::error::PolarsError> for ProviderError {
    fn from(e: polars::error::PolarsError) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(e: std::io::Error) -> Self {
        Self::DataNotAvailable(e.to_string())
    }
}

/// Any failure while retrieving fundamentals for one ticker.
#[derive(Error, Debug)]
#[error("Error processing {ticker} via {source_name}: {cause}")]
pub struct DataFetchError {
    pub ticker: String,
    pub source_name: String,
    #[source]
    pub cause: ProviderError,
}
