use crate::error::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder the analytics source reports for an uncaptured dimension.
pub const NOT_SET: &str = "(not set)";

/// Placeholder used for "no medium" / "no campaign" on direct traffic.
pub const NONE: &str = "(none)";

/// Returns true when an attribution dimension carries no information.
pub fn is_unset(value: &str) -> bool {
    value.is_empty() || value == NOT_SET || value == NONE
}

/// One purchased item inside one transaction, with both first-touch and
/// session-level attribution resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRow {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Shared by every item of the same checkout.
    pub transaction_id: String,
    pub first_source: String,
    pub first_medium: String,
    pub first_campaign: String,
    /// Session source, or the first-touch source when the session value is unset.
    pub source: String,
    pub medium: String,
    pub campaign: String,
    #[serde(default = "default_landing_page")]
    pub landing_page: String,
    pub item_name: String,
    /// Item-level revenue. Never summed or adjusted per row.
    pub revenue: f64,
}

fn default_landing_page() -> String {
    NOT_SET.to_string()
}

/// Summary totals derived from a resolved row set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    /// Sum of row revenue, rounded to two decimals.
    pub total_revenue: f64,
    /// Number of distinct transaction ids.
    pub total_transactions: usize,
    /// Number of rows (items).
    pub total_items: usize,
}

impl ReportTotals {
    /// Revenue per transaction; zero when there are no transactions.
    pub fn average_transaction_value(&self) -> f64 {
        if self.total_transactions > 0 {
            self.total_revenue / self.total_transactions as f64
        } else {
            0.0
        }
    }
}

/// Body of a successful `GET /api/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub rows: Vec<PurchaseRow>,
    pub totals: ReportTotals,
    pub row_count: usize,
}

impl ReportResponse {
    pub fn new(rows: Vec<PurchaseRow>, totals: ReportTotals) -> Self {
        let row_count = rows.len();
        Self {
            rows,
            totals,
            row_count,
        }
    }
}

/// Body of a failed `GET /api/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Inclusive report date range in the analytics source's date format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    /// Both ends must be present. The format itself is left to the upstream.
    pub fn new(start_date: Option<&str>, end_date: Option<&str>) -> DashboardResult<Self> {
        match (non_empty(start_date), non_empty(end_date)) {
            (Some(start), Some(end)) => Ok(Self {
                start_date: start.to_string(),
                end_date: end.to_string(),
            }),
            _ => Err(DashboardError::Validation(
                "startDate and endDate are required".to_string(),
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
