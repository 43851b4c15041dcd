//! Report totals over resolved purchase rows.

use dashboard_core::{PurchaseRow, ReportTotals};
use std::collections::HashSet;

/// Round to cents, hiding floating-point summation artifacts.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn compute_totals(rows: &[PurchaseRow]) -> ReportTotals {
    let revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    let transactions: HashSet<&str> = rows.iter().map(|r| r.transaction_id.as_str()).collect();

    ReportTotals {
        total_revenue: round_currency(revenue),
        total_transactions: transactions.len(),
        total_items: rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(transaction_id: &str, revenue: f64) -> PurchaseRow {
        PurchaseRow {
            date: "2024-03-15".into(),
            transaction_id: transaction_id.into(),
            first_source: "google".into(),
            first_medium: "organic".into(),
            first_campaign: "(not set)".into(),
            source: "google".into(),
            medium: "organic".into(),
            campaign: "(not set)".into(),
            landing_page: "/".into(),
            item_name: "Item".into(),
            revenue,
        }
    }

    #[test]
    fn test_totals_count_distinct_transactions() {
        let rows = vec![row("T1", 10.0), row("T1", 5.0), row("T2", 7.25)];
        let totals = compute_totals(&rows);
        assert_eq!(totals.total_revenue, 22.25);
        assert_eq!(totals.total_transactions, 2);
        assert_eq!(totals.total_items, 3);
        assert!(totals.total_transactions <= totals.total_items);
    }

    #[test]
    fn test_totals_of_empty_report() {
        let totals = compute_totals(&[]);
        assert_eq!(totals, ReportTotals::default());
        assert_eq!(totals.average_transaction_value(), 0.0);
    }

    #[test]
    fn test_rounding_hides_float_artifacts() {
        let rows = vec![row("T1", 0.1), row("T2", 0.2)];
        assert_eq!(compute_totals(&rows).total_revenue, 0.3);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for amount in [0.0, 0.005, 1.234, 15.0, 99.999, 1234.5678] {
            let once = round_currency(amount);
            assert_eq!(round_currency(once), once);
        }
    }
}
