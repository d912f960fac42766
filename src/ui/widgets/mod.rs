pub mod heatmap;
pub mod rate_list;
pub mod sensitivity_table;

pub use heatmap::Heatmap;
pub use rate_list::RateListEditor;
pub use sensitivity_table::SensitivityTable;
