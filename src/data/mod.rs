pub mod connectors;
pub mod fundamentals;
pub mod lookup;

pub use connectors::{CsvConnector, FundamentalsSource, RawStatements, YahooConnector};
pub use fundamentals::{fetch_fundamentals, normalize_ticker, trailing_average_fcf, FundamentalsSnapshot};
pub use lookup::{lookup_first, LineItem};
