pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;
pub mod ui;

pub use error::{DataFetchError, DcfError, ProviderError, Result};
