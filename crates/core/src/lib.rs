pub mod config;
pub mod dataset;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use dataset::Datasets;
pub use error::{DashboardError, DashboardResult};
