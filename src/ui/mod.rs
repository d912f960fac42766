mod app;
mod panels;
mod state;
mod widgets;
pub mod services;

pub use app::DcfApp;
pub use state::{AppState, BaseCase, ValuationDisplay};
