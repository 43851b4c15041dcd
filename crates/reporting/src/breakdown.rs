//! Grouped breakdowns of the full row set: revenue by first-touch
//! source/medium, top sources with an "other" bucket, and revenue per day.

use crate::grouping::group_by;
use dashboard_core::PurchaseRow;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Sources shown individually before the rest collapse into "other".
pub const TOP_SOURCES: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMediumSummary {
    pub source: String,
    pub medium: String,
    pub revenue: f64,
    /// Distinct transactions, not item rows.
    pub transactions: usize,
    /// Share of the revenue of all rows, in percent.
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SourceSlice {
    Source { name: String, revenue: f64 },
    Other { revenue: f64 },
}

impl SourceSlice {
    pub fn revenue(&self) -> f64 {
        match self {
            SourceSlice::Source { revenue, .. } | SourceSlice::Other { revenue } => *revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRevenue {
    pub date: String,
    pub revenue: f64,
}

#[derive(Default)]
struct RevenueAndTransactions {
    revenue: f64,
    transactions: HashSet<String>,
}

/// Highest revenue first; ties fall back to the key so output is stable.
fn by_revenue_desc<K: Ord>(a: &(K, f64), b: &(K, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

/// Revenue and distinct transactions per (first source, first medium).
pub fn source_medium_breakdown(rows: &[PurchaseRow]) -> Vec<SourceMediumSummary> {
    let total_revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    let groups = group_by(
        rows,
        |r| (r.first_source.as_str(), r.first_medium.as_str()),
        |acc: &mut RevenueAndTransactions, r| {
            acc.revenue += r.revenue;
            acc.transactions.insert(r.transaction_id.clone());
        },
    );

    let mut ranked: Vec<((&str, &str), f64)> =
        groups.iter().map(|(key, acc)| (*key, acc.revenue)).collect();
    ranked.sort_by(by_revenue_desc);

    ranked
        .into_iter()
        .map(|((source, medium), revenue)| SourceMediumSummary {
            source: source.to_string(),
            medium: medium.to_string(),
            revenue,
            transactions: groups[&(source, medium)].transactions.len(),
            share_percent: if total_revenue > 0.0 {
                revenue * 100.0 / total_revenue
            } else {
                0.0
            },
        })
        .collect()
}

/// Revenue per first-touch source: the top `top` sources, then one "other"
/// slice when the remainder is strictly positive.
pub fn source_revenue_slices(rows: &[PurchaseRow], top: usize) -> Vec<SourceSlice> {
    let groups = group_by(
        rows,
        |r| r.first_source.as_str(),
        |acc: &mut f64, r| *acc += r.revenue,
    );
    let mut ranked: Vec<(&str, f64)> = groups.into_iter().collect();
    ranked.sort_by(by_revenue_desc);

    let rest: f64 = ranked.iter().skip(top).map(|(_, revenue)| revenue).sum();
    let mut slices: Vec<SourceSlice> = ranked
        .into_iter()
        .take(top)
        .map(|(name, revenue)| SourceSlice::Source {
            name: name.to_string(),
            revenue,
        })
        .collect();
    if rest > 0.0 {
        slices.push(SourceSlice::Other { revenue: rest });
    }
    slices
}

/// Revenue per day, oldest first. Dates are zero-padded so string order is
/// chronological.
pub fn revenue_by_date(rows: &[PurchaseRow]) -> Vec<DailyRevenue> {
    let groups = group_by(rows, |r| r.date.as_str(), |acc: &mut f64, r| *acc += r.revenue);
    let mut days: Vec<DailyRevenue> = groups
        .into_iter()
        .map(|(date, revenue)| DailyRevenue {
            date: date.to_string(),
            revenue,
        })
        .collect();
    days.sort_by(|a, b| a.date.cmp(&b.date));
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, tx: &str, source: &str, medium: &str, revenue: f64) -> PurchaseRow {
        PurchaseRow {
            date: date.into(),
            transaction_id: tx.into(),
            first_source: source.into(),
            first_medium: medium.into(),
            first_campaign: "(not set)".into(),
            source: source.into(),
            medium: medium.into(),
            campaign: "(not set)".into(),
            landing_page: "(not set)".into(),
            item_name: "Item".into(),
            revenue,
        }
    }

    #[test]
    fn test_breakdown_counts_distinct_transactions() {
        let rows = vec![
            row("2024-03-01", "T1", "google", "cpc", 10.0),
            row("2024-03-01", "T1", "google", "cpc", 20.0),
            row("2024-03-01", "T1", "google", "cpc", 30.0),
            row("2024-03-02", "T2", "facebook", "paid", 40.0),
        ];
        let summary = source_medium_breakdown(&rows);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].source, "google");
        assert_eq!(summary[0].revenue, 60.0);
        assert_eq!(summary[0].transactions, 1);
        assert_eq!(summary[0].share_percent, 60.0);
        assert_eq!(summary[1].source, "facebook");
        assert_eq!(summary[1].share_percent, 40.0);
    }

    #[test]
    fn test_breakdown_groups_by_source_and_medium() {
        let rows = vec![
            row("2024-03-01", "T1", "google", "cpc", 10.0),
            row("2024-03-01", "T2", "google", "organic", 10.0),
        ];
        assert_eq!(source_medium_breakdown(&rows).len(), 2);
    }

    #[test]
    fn test_breakdown_share_is_zero_without_revenue() {
        let rows = vec![row("2024-03-01", "T1", "google", "cpc", 0.0)];
        let summary = source_medium_breakdown(&rows);
        assert_eq!(summary[0].share_percent, 0.0);
    }

    #[test]
    fn test_slices_keep_top_sources_and_collapse_rest() {
        let mut rows: Vec<PurchaseRow> = (0..10)
            .map(|i| row("2024-03-01", &format!("T{i}"), &format!("s{i}"), "m", 100.0 - i as f64))
            .collect();
        let slices = source_revenue_slices(&rows, TOP_SOURCES);
        assert_eq!(slices.len(), TOP_SOURCES + 1);
        assert_eq!(
            slices[0],
            SourceSlice::Source {
                name: "s0".into(),
                revenue: 100.0
            }
        );
        assert_eq!(slices[TOP_SOURCES], SourceSlice::Other { revenue: 92.0 + 91.0 });

        // Zero-revenue remainder adds no "other" slice
        rows[8].revenue = 0.0;
        rows[9].revenue = 0.0;
        let slices = source_revenue_slices(&rows, TOP_SOURCES);
        assert_eq!(slices.len(), TOP_SOURCES);
        assert!(slices.iter().all(|s| matches!(s, SourceSlice::Source { .. })));
    }

    #[test]
    fn test_slices_without_remainder() {
        let rows = vec![
            row("2024-03-01", "T1", "google", "cpc", 5.0),
            row("2024-03-01", "T2", "bing", "cpc", 7.0),
            row("2024-03-01", "T3", "google", "cpc", 5.0),
        ];
        let slices = source_revenue_slices(&rows, TOP_SOURCES);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].revenue(), 10.0);
        assert_eq!(slices[1].revenue(), 7.0);
    }

    #[test]
    fn test_revenue_by_date_sorted_ascending() {
        let rows = vec![
            row("2024-03-02", "T1", "google", "cpc", 5.0),
            row("2024-02-28", "T2", "google", "cpc", 1.0),
            row("2024-03-02", "T3", "google", "cpc", 2.5),
        ];
        let days = revenue_by_date(&rows);
        assert_eq!(
            days,
            vec![
                DailyRevenue {
                    date: "2024-02-28".into(),
                    revenue: 1.0
                },
                DailyRevenue {
                    date: "2024-03-02".into(),
                    revenue: 7.5
                },
            ]
        );
    }
}
