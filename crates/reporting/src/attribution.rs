//! Attribution resolver: joins the item-level attribution query with the
//! landing-page query into one `PurchaseRow` per (transaction, item).
//!
//! The analytics API caps dimensions per request, so the report is split in
//! two queries. Both must succeed; there are no partial reports.

use dashboard_analytics::{AnalyticsError, AnalyticsSource, FilterExpression, ReportQuery, ResultRow};
use dashboard_core::types::{is_unset, NOT_SET};
use dashboard_core::{DashboardError, DashboardResult, DateRange, PurchaseRow};
use std::collections::HashMap;
use tracing::{debug, info};

/// Dimensions of the item-level query, in column order.
pub const PRIMARY_DIMENSIONS: [&str; 9] = [
    "date",
    "transactionId",
    "firstUserSource",
    "firstUserMedium",
    "firstUserCampaignName",
    "sessionSource",
    "sessionMedium",
    "sessionCampaignName",
    "itemName",
];

pub const LANDING_PAGE_DIMENSIONS: [&str; 2] = ["transactionId", "landingPagePlusQueryString"];

pub const REVENUE_METRIC: &str = "itemRevenue";

const TRANSACTION_ID: &str = "transactionId";

pub struct AttributionResolver<S> {
    source: S,
    property: String,
    row_limit: u32,
}

impl<S: AnalyticsSource> AttributionResolver<S> {
    pub fn new(source: S, property: impl Into<String>, row_limit: u32) -> Self {
        Self {
            source,
            property: property.into(),
            row_limit,
        }
    }

    /// Item rows with first-touch and session attribution, newest first.
    pub fn primary_query(&self, range: &DateRange) -> ReportQuery {
        ReportQuery::new(&self.property, range)
            .with_dimensions(&PRIMARY_DIMENSIONS)
            .with_metrics(&[REVENUE_METRIC])
            .with_filter(transaction_filter())
            .order_by_dimension("date", true)
            .with_limit(self.row_limit)
    }

    pub fn landing_page_query(&self, range: &DateRange) -> ReportQuery {
        ReportQuery::new(&self.property, range)
            .with_dimensions(&LANDING_PAGE_DIMENSIONS)
            .with_metrics(&[REVENUE_METRIC])
            .with_filter(transaction_filter())
            .with_limit(self.row_limit)
    }

    /// Run both queries sequentially and join them.
    pub async fn resolve(&self, range: &DateRange) -> DashboardResult<Vec<PurchaseRow>> {
        let primary = self
            .source
            .run_report(&self.primary_query(range))
            .await
            .map_err(upstream)?;
        debug!(rows = primary.rows.len(), "Primary attribution query returned");

        let landing = self
            .source
            .run_report(&self.landing_page_query(range))
            .await
            .map_err(upstream)?;
        debug!(rows = landing.rows.len(), "Landing page query returned");

        let pages = landing_page_lookup(&landing.rows);
        let rows: Vec<PurchaseRow> = primary.rows.iter().map(|r| resolve_row(r, &pages)).collect();

        info!(
            start_date = %range.start_date,
            end_date = %range.end_date,
            rows = rows.len(),
            transactions_with_landing_page = pages.len(),
            "Attribution resolved"
        );
        Ok(rows)
    }
}

/// Rows without a transaction id are not purchases.
fn transaction_filter() -> FilterExpression {
    FilterExpression::full_regexp(TRANSACTION_ID, ".+")
}

fn upstream(err: AnalyticsError) -> DashboardError {
    DashboardError::Upstream(err.to_string())
}

/// `YYYYMMDD` becomes `YYYY-MM-DD`; anything else passes through.
pub fn normalize_date(raw: &str) -> String {
    if raw.len() == 8 && raw.is_ascii() {
        format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8])
    } else {
        raw.to_string()
    }
}

/// Session value, or the first-touch value when the session value is unset.
pub fn resolve_attribution(session: &str, first_touch: &str) -> String {
    if is_unset(session) {
        first_touch.to_string()
    } else {
        session.to_string()
    }
}

/// Unparseable or missing revenue counts as zero for that row only.
pub fn parse_revenue(raw: Option<&str>) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Map each transaction id to its landing page.
///
/// Informative pages always beat sentinels. When one transaction reports
/// several informative pages, the one carrying the most item revenue wins,
/// and the first seen wins a tie.
pub fn landing_page_lookup(rows: &[ResultRow]) -> HashMap<String, String> {
    let mut candidates: Vec<(&str, &str, f64)> = Vec::new();
    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();

    for row in rows {
        let transaction_id = row.dimension(0);
        let page = row.dimension(1);
        if transaction_id.is_empty() || is_unset(page) {
            continue;
        }
        let revenue = parse_revenue(row.metric(0));
        match positions.get(&(transaction_id, page)) {
            Some(&i) => candidates[i].2 += revenue,
            None => {
                positions.insert((transaction_id, page), candidates.len());
                candidates.push((transaction_id, page, revenue));
            }
        }
    }

    let mut best: HashMap<&str, (&str, f64)> = HashMap::new();
    for (transaction_id, page, revenue) in candidates {
        match best.get_mut(transaction_id) {
            Some(current) if revenue > current.1 => *current = (page, revenue),
            Some(_) => {}
            None => {
                best.insert(transaction_id, (page, revenue));
            }
        }
    }

    best.into_iter()
        .map(|(tx, (page, _))| (tx.to_string(), page.to_string()))
        .collect()
}

/// Build one resolved row from a primary query row.
pub fn resolve_row(row: &ResultRow, landing_pages: &HashMap<String, String>) -> PurchaseRow {
    let transaction_id = row.dimension(1);
    let first_source = row.dimension(2);
    let first_medium = row.dimension(3);
    let first_campaign = row.dimension(4);

    PurchaseRow {
        date: normalize_date(row.dimension(0)),
        transaction_id: transaction_id.to_string(),
        first_source: first_source.to_string(),
        first_medium: first_medium.to_string(),
        first_campaign: first_campaign.to_string(),
        source: resolve_attribution(row.dimension(5), first_source),
        medium: resolve_attribution(row.dimension(6), first_medium),
        campaign: resolve_attribution(row.dimension(7), first_campaign),
        landing_page: landing_pages
            .get(transaction_id)
            .cloned()
            .unwrap_or_else(|| NOT_SET.to_string()),
        item_name: row.dimension(8).to_string(),
        revenue: parse_revenue(row.metric(0)),
    }
}
