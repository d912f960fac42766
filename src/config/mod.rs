pub mod traits;
pub mod valuation;
pub mod data;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use valuation::ValuationConfig;
pub use data::{DataConfig, SourceKind};
pub use traits::ConfigSection;
