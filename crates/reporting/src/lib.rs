#![warn(clippy::unwrap_used)]

//! Purchase reporting: attribution resolution over two analytics queries,
//! summary totals, and the grouped breakdowns behind the dashboard charts.

pub mod aggregate;
pub mod attribution;
pub mod breakdown;
pub mod grouping;

pub use aggregate::{compute_totals, round_currency};
pub use attribution::AttributionResolver;
pub use breakdown::{revenue_by_date, source_medium_breakdown, source_revenue_slices, SourceSlice};
pub use grouping::group_by;
