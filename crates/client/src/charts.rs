//! Chart models for the revenue-by-source doughnut and the revenue-over-time
//! line. Both are rebuilt from the full row set on every fetch.

use crate::locale::Labels;
use crate::palette::{chart_color, fallback_color};
use dashboard_core::PurchaseRow;
use dashboard_reporting::breakdown::{revenue_by_date, source_revenue_slices, SourceSlice, TOP_SOURCES};
use dashboard_reporting::round_currency;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub doughnut: DoughnutChart,
    pub line: LineChart,
}

impl DoughnutChart {
    pub fn build(rows: &[PurchaseRow], labels: &Labels) -> Self {
        let slices = source_revenue_slices(rows, TOP_SOURCES);
        let mut chart = DoughnutChart {
            labels: Vec::with_capacity(slices.len()),
            values: Vec::with_capacity(slices.len()),
            colors: Vec::with_capacity(slices.len()),
        };
        for (index, slice) in slices.iter().enumerate() {
            let (label, color) = match slice {
                SourceSlice::Source { name, .. } => (name.clone(), chart_color(name, index)),
                SourceSlice::Other { .. } => (labels.other.to_string(), fallback_color(index)),
            };
            chart.labels.push(label);
            chart.values.push(round_currency(slice.revenue()));
            chart.colors.push(color.to_string());
        }
        chart
    }

    /// Chart.js configuration object.
    pub fn config(&self, title: &str) -> Value {
        json!({
            "type": "doughnut",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "data": self.values,
                    "backgroundColor": self.colors,
                }],
            },
            "options": {
                "plugins": { "title": { "display": true, "text": title } },
            },
        })
    }
}

impl LineChart {
    pub fn build(rows: &[PurchaseRow]) -> Self {
        let days = revenue_by_date(rows);
        LineChart {
            labels: days.iter().map(|d| d.date.clone()).collect(),
            values: days.iter().map(|d| round_currency(d.revenue)).collect(),
        }
    }

    pub fn config(&self, title: &str) -> Value {
        json!({
            "type": "line",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "label": title,
                    "data": self.values,
                    "fill": false,
                    "tension": 0.2,
                }],
            },
            "options": {
                "plugins": { "title": { "display": true, "text": title } },
            },
        })
    }
}

impl ChartSet {
    pub fn build(rows: &[PurchaseRow], labels: &Labels) -> Self {
        ChartSet {
            doughnut: DoughnutChart::build(rows, labels),
            line: LineChart::build(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::DisplayLanguage;

    fn row(date: &str, source: &str, revenue: f64) -> PurchaseRow {
        PurchaseRow {
            date: date.into(),
            transaction_id: format!("{date}-{source}"),
            first_source: source.into(),
            first_medium: "cpc".into(),
            first_campaign: "(not set)".into(),
            source: source.into(),
            medium: "cpc".into(),
            campaign: "(not set)".into(),
            landing_page: "(not set)".into(),
            item_name: "Item".into(),
            revenue,
        }
    }

    #[test]
    fn test_doughnut_labels_colors_and_other_bucket() {
        let labels = Labels::for_language(DisplayLanguage::English);
        let mut rows: Vec<PurchaseRow> = (0..9)
            .map(|i| row("2024-03-01", &format!("partner{i}"), 50.0 - i as f64))
            .collect();
        rows.push(row("2024-03-01", "google", 100.0));

        let chart = DoughnutChart::build(&rows, labels);
        assert_eq!(chart.labels.len(), 9);
        assert_eq!(chart.labels[0], "google");
        assert_eq!(chart.colors[0], "#4285F4");
        assert_eq!(chart.labels[8], "Other");
        assert_eq!(chart.values[8], 43.0 + 42.0);
        assert_eq!(chart.labels.len(), chart.colors.len());
        assert_eq!(chart.values.len(), chart.colors.len());
    }

    #[test]
    fn test_line_chart_one_point_per_date() {
        let rows = vec![
            row("2024-03-02", "google", 5.0),
            row("2024-03-01", "bing", 1.5),
            row("2024-03-02", "bing", 2.0),
        ];
        let chart = LineChart::build(&rows);
        assert_eq!(chart.labels, vec!["2024-03-01", "2024-03-02"]);
        assert_eq!(chart.values, vec![1.5, 7.0]);
    }

    #[test]
    fn test_chart_config_shape() {
        let labels = Labels::for_language(DisplayLanguage::English);
        let charts = ChartSet::build(&[row("2024-03-01", "google", 9.99)], labels);
        let config = charts.doughnut.config(labels.revenue_by_source);
        assert_eq!(config["type"], "doughnut");
        assert_eq!(config["data"]["labels"][0], "google");
        assert_eq!(config["data"]["datasets"][0]["data"][0], 9.99);
        let config = charts.line.config(labels.revenue_over_time);
        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"][0], "2024-03-01");
    }
}
