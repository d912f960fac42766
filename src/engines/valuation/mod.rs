pub mod dcf;
pub mod sensitivity;

pub use dcf::{intrinsic_value_per_share, valuation_breakdown};
pub use sensitivity::{SensitivityMatrix, SweepBase};
