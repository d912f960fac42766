pub mod config_bridge;
pub mod exporter;
pub mod valuation_runner;

pub use config_bridge::ConfigBridge;
pub use exporter::MatrixExporter;
pub use valuation_runner::{run_valuation, ValuationResult, ValuationRunner};
