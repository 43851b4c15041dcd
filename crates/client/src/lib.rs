#![warn(clippy::unwrap_used)]

//! Report client: fetches resolved purchase rows once per date range and
//! keeps an in-memory view (search, sort, pagination) over them, rendering
//! the dashboard regions and exporting the current view as CSV.

pub mod charts;
pub mod columns;
pub mod dashboard;
pub mod export;
pub mod fetch;
pub mod format;
pub mod locale;
pub mod palette;
pub mod render;
pub mod view;

pub use charts::ChartSet;
pub use columns::Column;
pub use dashboard::Dashboard;
pub use export::{export_csv, CsvExport, ExportError};
pub use fetch::{FetchError, ReportClient, ReportFetcher};
pub use locale::Labels;
pub use view::{default_range, ClientViewState, Phase, SortDirection, PAGE_SIZE};
