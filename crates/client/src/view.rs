//! Client view state: the fetched rows plus the search/sort/page view over
//! them. Only a fetch touches the network; every other transition works on
//! rows already in memory.

use crate::charts::ChartSet;
use crate::columns::Column;
use crate::fetch::FetchError;
use crate::locale::Labels;
use chrono::{Duration, NaiveDate};
use dashboard_core::{DateRange, PurchaseRow, ReportResponse, ReportTotals};
use std::cmp::Ordering;
use tracing::debug;

/// Rows per table page.
pub const PAGE_SIZE: usize = 50;

/// Days covered by the initial range, ending today.
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Range loaded before the user picks one.
pub fn default_range(today: NaiveDate) -> DateRange {
    let start = today - Duration::days(DEFAULT_RANGE_DAYS);
    DateRange {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: today.format("%Y-%m-%d").to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Error(String),
    Empty,
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: Column::Date,
            direction: SortDirection::Desc,
        }
    }
}

/// Rows where any field contains `query`, case-insensitively. A blank query
/// keeps every row in its original order.
pub fn filter_rows(rows: &[PurchaseRow], query: &str) -> Vec<PurchaseRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| {
            Column::ALL
                .iter()
                .any(|c| c.value(row).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

pub fn compare_rows(a: &PurchaseRow, b: &PurchaseRow, column: Column) -> Ordering {
    if column.is_numeric() {
        a.revenue.partial_cmp(&b.revenue).unwrap_or(Ordering::Equal)
    } else {
        column
            .value(a)
            .to_lowercase()
            .cmp(&column.value(b).to_lowercase())
    }
}

/// Stable sort; equal keys keep their relative order in either direction.
pub fn sort_rows(rows: &mut [PurchaseRow], sort: SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, sort.column);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// `ceil(count / page_size)`, never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone)]
pub struct ClientViewState {
    phase: Phase,
    all_rows: Vec<PurchaseRow>,
    filtered_rows: Vec<PurchaseRow>,
    totals: ReportTotals,
    charts: Option<ChartSet>,
    sort: SortState,
    query: String,
    current_page: usize,
    page_size: usize,
    controls_enabled: bool,
    range: Option<DateRange>,
}

impl Default for ClientViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientViewState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            all_rows: Vec::new(),
            filtered_rows: Vec::new(),
            totals: ReportTotals::default(),
            charts: None,
            sort: SortState::default(),
            query: String::new(),
            current_page: 1,
            page_size: PAGE_SIZE,
            controls_enabled: true,
            range: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn all_rows(&self) -> &[PurchaseRow] {
        &self.all_rows
    }

    pub fn filtered_rows(&self) -> &[PurchaseRow] {
        &self.filtered_rows
    }

    pub fn totals(&self) -> &ReportTotals {
        &self.totals
    }

    pub fn charts(&self) -> Option<&ChartSet> {
        self.charts.as_ref()
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Range of the last fetch that passed validation.
    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_rows.len(), self.page_size)
    }

    /// The current page's slice of the filtered, sorted rows.
    pub fn page_rows(&self) -> &[PurchaseRow] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.filtered_rows.len());
        self.filtered_rows.get(start..end).unwrap_or(&[])
    }

    /// Enter `Loading` for a valid range. Returns `None` while a fetch is in
    /// flight, or after recording a validation error for a missing date.
    pub fn begin_fetch(
        &mut self,
        start_date: &str,
        end_date: &str,
        labels: &Labels,
    ) -> Option<DateRange> {
        if !self.controls_enabled {
            debug!("Fetch ignored while another is in flight");
            return None;
        }
        let range = match DateRange::new(Some(start_date), Some(end_date)) {
            Ok(range) => range,
            Err(_) => {
                self.phase = Phase::Error(labels.missing_dates.to_string());
                return None;
            }
        };

        self.phase = Phase::Loading;
        self.controls_enabled = false;
        self.charts = None;
        self.range = Some(range.clone());
        Some(range)
    }

    /// Leave `Loading` with the fetch outcome. Controls are re-enabled on
    /// every path.
    pub fn finish_fetch(&mut self, outcome: Result<ReportResponse, FetchError>, labels: &Labels) {
        self.controls_enabled = true;

        let report = match outcome {
            Ok(report) => report,
            Err(err) => {
                self.phase = Phase::Error(err.display_message(labels));
                self.clear_rows();
                return;
            }
        };

        self.all_rows = report.rows;
        self.totals = report.totals;
        self.filtered_rows = self.all_rows.clone();
        self.query.clear();
        self.current_page = 1;

        if self.all_rows.is_empty() {
            self.phase = Phase::Empty;
            return;
        }

        sort_rows(&mut self.filtered_rows, self.sort);
        self.charts = Some(ChartSet::build(&self.all_rows, labels));
        self.phase = Phase::Populated;
    }

    /// Drop the previous range's rows so nothing stale can be shown or
    /// exported under the new range.
    fn clear_rows(&mut self) {
        self.all_rows.clear();
        self.filtered_rows.clear();
        self.totals = ReportTotals::default();
        self.charts = None;
        self.query.clear();
        self.current_page = 1;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.filtered_rows = filter_rows(&self.all_rows, query);
        self.current_page = 1;
        sort_rows(&mut self.filtered_rows, self.sort);
    }

    /// Header click: flip the active column, otherwise sort ascending by the
    /// new one.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = if self.sort.column == column {
            SortState {
                column,
                direction: self.sort.direction.flipped(),
            }
        } else {
            SortState {
                column,
                direction: SortDirection::Asc,
            }
        };
        self.current_page = 1;
        sort_rows(&mut self.filtered_rows, self.sort);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }
}
