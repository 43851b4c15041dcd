pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DisplayLanguage};
pub use error::{DashboardError, DashboardResult};
pub use types::{is_unset, DateRange, ErrorBody, PurchaseRow, ReportResponse, ReportTotals};
