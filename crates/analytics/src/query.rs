//! Report query model, shaped after the Data API `runReport` request and
//! response bodies.

use dashboard_core::DateRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Property the query runs against; part of the URL, not the body.
    #[serde(skip)]
    pub property: String,
    pub date_ranges: Vec<DateRange>,
    pub dimensions: Vec<FieldName>,
    pub metrics: Vec<FieldName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterExpression {
    pub filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    pub string_filter: StringFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    pub match_type: MatchType,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    FullRegexp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    pub dimension: DimensionOrder,
    pub desc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionOrder {
    pub dimension_name: String,
}

impl FilterExpression {
    /// Matches rows whose `field` fully matches `pattern`.
    pub fn full_regexp(field: &str, pattern: &str) -> Self {
        Self {
            filter: Filter {
                field_name: field.to_string(),
                string_filter: StringFilter {
                    match_type: MatchType::FullRegexp,
                    value: pattern.to_string(),
                },
            },
        }
    }
}

impl ReportQuery {
    pub fn new(property: &str, range: &DateRange) -> Self {
        Self {
            property: property.to_string(),
            date_ranges: vec![range.clone()],
            dimensions: Vec::new(),
            metrics: Vec::new(),
            dimension_filter: None,
            order_bys: Vec::new(),
            limit: None,
        }
    }

    pub fn with_dimensions(mut self, names: &[&str]) -> Self {
        self.dimensions = names.iter().map(|n| FieldName { name: n.to_string() }).collect();
        self
    }

    pub fn with_metrics(mut self, names: &[&str]) -> Self {
        self.metrics = names.iter().map(|n| FieldName { name: n.to_string() }).collect();
        self
    }

    pub fn with_filter(mut self, filter: FilterExpression) -> Self {
        self.dimension_filter = Some(filter);
        self
    }

    pub fn order_by_dimension(mut self, name: &str, desc: bool) -> Self {
        self.order_bys.push(OrderBy {
            dimension: DimensionOrder {
                dimension_name: name.to_string(),
            },
            desc,
        });
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Rows of parallel dimension/metric value arrays.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    #[serde(default)]
    pub rows: Vec<ResultRow>,
    /// Total matching rows upstream, which may exceed `rows.len()` when the
    /// limit truncated the result.
    #[serde(default)]
    pub row_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    #[serde(default)]
    pub dimension_values: Vec<CellValue>,
    #[serde(default)]
    pub metric_values: Vec<CellValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CellValue {
    #[serde(default)]
    pub value: String,
}

impl ResultRow {
    pub fn new(dimensions: &[&str], metrics: &[&str]) -> Self {
        let cells = |values: &[&str]| {
            values
                .iter()
                .map(|v| CellValue {
                    value: v.to_string(),
                })
                .collect()
        };
        Self {
            dimension_values: cells(dimensions),
            metric_values: cells(metrics),
        }
    }

    /// Dimension value at `index`, empty when the column is missing.
    pub fn dimension(&self, index: usize) -> &str {
        self.dimension_values
            .get(index)
            .map(|c| c.value.as_str())
            .unwrap_or("")
    }

    pub fn metric(&self, index: usize) -> Option<&str> {
        self.metric_values.get(index).map(|c| c.value.as_str())
    }
}

impl ReportResult {
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    pub fn is_truncated(&self) -> bool {
        self.row_count > self.rows.len() as u64
    }
}
