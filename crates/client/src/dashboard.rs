//! Dashboard controller: wires user actions to the view state and the
//! report fetcher, and exposes the rendered page and the export.

use crate::columns::Column;
use crate::export::{export_csv, CsvExport, ExportError};
use crate::fetch::ReportFetcher;
use crate::locale::Labels;
use crate::render;
use crate::view::{ClientViewState, Phase};
use dashboard_core::config::DisplayConfig;
use tracing::{info, warn};

pub struct Dashboard<F> {
    fetcher: F,
    state: ClientViewState,
    display: DisplayConfig,
}

impl<F: ReportFetcher> Dashboard<F> {
    pub fn new(fetcher: F, display: DisplayConfig) -> Self {
        Self {
            fetcher,
            state: ClientViewState::new(),
            display,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_language(self.display.language)
    }

    pub fn state(&self) -> &ClientViewState {
        &self.state
    }

    /// Fetch the report for a range and replace the view with it. Returns
    /// the phase the view settled in.
    pub async fn fetch(&mut self, start_date: &str, end_date: &str) -> &Phase {
        let labels = self.labels();
        let Some(range) = self.state.begin_fetch(start_date, end_date, labels) else {
            return self.state.phase();
        };

        let outcome = self.fetcher.fetch_report(&range).await;
        match &outcome {
            Ok(report) => info!(
                start_date = %range.start_date,
                end_date = %range.end_date,
                rows = report.row_count,
                "Report loaded"
            ),
            Err(e) => warn!(error = %e, "Report fetch failed"),
        }
        self.state.finish_fetch(outcome, labels);
        self.state.phase()
    }

    pub fn search(&mut self, query: &str) {
        self.state.set_query(query);
    }

    pub fn sort(&mut self, column: Column) {
        self.state.toggle_sort(column);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.state.go_to_page(page);
    }

    pub fn next_page(&mut self) {
        self.state.next_page();
    }

    pub fn previous_page(&mut self) {
        self.state.previous_page();
    }

    /// CSV of the filtered view, or `None` unless the last fetch populated
    /// the view with rows.
    pub fn export(&self) -> Result<Option<CsvExport>, ExportError> {
        match (self.state.phase(), self.state.range()) {
            (Phase::Populated, Some(range)) => {
                export_csv(self.state.filtered_rows(), range, self.labels())
            }
            _ => Ok(None),
        }
    }

    pub fn render_page(&self) -> String {
        render::render_page(&self.state, &self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use dashboard_core::{DateRange, DisplayLanguage, PurchaseRow, ReportResponse};
    use std::sync::Mutex;

    type Outcome = fn() -> Result<ReportResponse, FetchError>;

    /// Answers each fetch with the next scripted outcome; the last one
    /// repeats.
    struct FakeFetcher {
        outcomes: Vec<Outcome>,
        requests: Mutex<Vec<DateRange>>,
    }

    impl FakeFetcher {
        fn new(outcome: Outcome) -> Self {
            Self::scripted(vec![outcome])
        }

        fn scripted(outcomes: Vec<Outcome>) -> Self {
            Self {
                outcomes,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReportFetcher for FakeFetcher {
        async fn fetch_report(&self, range: &DateRange) -> Result<ReportResponse, FetchError> {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len().min(self.outcomes.len() - 1);
            requests.push(range.clone());
            (self.outcomes[index])()
        }
    }

    fn server_failure() -> Result<ReportResponse, FetchError> {
        Err(FetchError::Server {
            status: 500,
            error: Some("Failed to fetch data from Google Analytics".into()),
            details: Some("PERMISSION_DENIED".into()),
        })
    }

    fn row(tx: &str, item: &str, source: &str, revenue: f64) -> PurchaseRow {
        PurchaseRow {
            date: "2024-03-15".into(),
            transaction_id: tx.into(),
            first_source: source.into(),
            first_medium: "cpc".into(),
            first_campaign: "spring".into(),
            source: source.into(),
            medium: "cpc".into(),
            campaign: "spring".into(),
            landing_page: "/sale".into(),
            item_name: item.into(),
            revenue,
        }
    }

    fn two_rows() -> Result<ReportResponse, FetchError> {
        let rows = vec![row("T1", "Mug", "google", 10.0), row("T2", "Hat", "facebook", 5.0)];
        let totals = dashboard_reporting::compute_totals(&rows);
        Ok(ReportResponse::new(rows, totals))
    }

    fn english() -> DisplayConfig {
        DisplayConfig {
            language: DisplayLanguage::English,
            currency_symbol: "₪".into(),
        }
    }

    #[tokio::test]
    async fn test_fetch_then_search_and_export() {
        let mut dashboard = Dashboard::new(FakeFetcher::new(two_rows), english());
        assert_eq!(dashboard.fetch("2024-03-01", "2024-03-31").await, &Phase::Populated);
        assert_eq!(dashboard.state().totals().total_revenue, 15.0);

        dashboard.search("hat");
        let export = dashboard.export().unwrap().unwrap();
        assert_eq!(export.filename, "purchases_2024-03-01_to_2024-03-31.csv");
        assert_eq!(export.content.lines().count(), 2);
        assert!(export.content.contains(r#""Hat""#));
        assert!(!export.content.contains(r#""Mug""#));

        dashboard.search("no such purchase");
        assert_eq!(dashboard.export().unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_date_does_not_call_fetcher() {
        let mut dashboard = Dashboard::new(FakeFetcher::new(two_rows), english());
        let phase = dashboard.fetch("2024-03-01", "").await.clone();
        assert_eq!(phase, Phase::Error("Please select a start and end date".into()));
        assert!(dashboard.fetcher.requests.lock().unwrap().is_empty());
        assert_eq!(dashboard.export().unwrap(), None);
    }

    #[tokio::test]
    async fn test_server_error_shows_details() {
        let mut dashboard = Dashboard::new(FakeFetcher::new(server_failure), english());
        dashboard.fetch("2024-03-01", "2024-03-31").await;
        assert_eq!(dashboard.state().phase(), &Phase::Error("PERMISSION_DENIED".into()));
        assert!(dashboard.state().controls_enabled());
        assert!(dashboard.render_page().contains("PERMISSION_DENIED"));
    }

    #[tokio::test]
    async fn test_failed_refetch_exports_nothing() {
        let fetcher = FakeFetcher::scripted(vec![two_rows, server_failure]);
        let mut dashboard = Dashboard::new(fetcher, english());
        dashboard.fetch("2024-03-01", "2024-03-31").await;
        assert!(dashboard.export().unwrap().is_some());

        dashboard.fetch("2024-04-01", "2024-04-30").await;
        assert_eq!(dashboard.state().phase(), &Phase::Error("PERMISSION_DENIED".into()));
        assert!(dashboard.state().filtered_rows().is_empty());
        assert_eq!(dashboard.export().unwrap(), None);
        assert!(!dashboard.render_page().contains("T1"));
    }

    #[tokio::test]
    async fn test_sort_persists_across_fetches() {
        let mut dashboard = Dashboard::new(FakeFetcher::new(two_rows), english());
        dashboard.fetch("2024-03-01", "2024-03-31").await;
        dashboard.sort(Column::Revenue);
        assert_eq!(dashboard.state().filtered_rows()[0].revenue, 5.0);

        dashboard.fetch("2024-04-01", "2024-04-30").await;
        assert_eq!(dashboard.state().sort().column, Column::Revenue);
        assert_eq!(dashboard.state().filtered_rows()[0].revenue, 5.0);
        assert_eq!(dashboard.fetcher.requests.lock().unwrap().len(), 2);
    }
}
