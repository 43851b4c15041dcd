//! Report columns shared by the table, the sort control and the export.

use crate::locale::Labels;
use dashboard_core::PurchaseRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    TransactionId,
    FirstSource,
    FirstMedium,
    FirstCampaign,
    Source,
    Medium,
    Campaign,
    LandingPage,
    ItemName,
    Revenue,
}

impl Column {
    /// Table and export order.
    pub const ALL: [Column; 11] = [
        Column::Date,
        Column::TransactionId,
        Column::FirstSource,
        Column::FirstMedium,
        Column::FirstCampaign,
        Column::Source,
        Column::Medium,
        Column::Campaign,
        Column::LandingPage,
        Column::ItemName,
        Column::Revenue,
    ];

    /// Row field name, used as the header's `data-col` value.
    pub fn key(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::TransactionId => "transactionId",
            Column::FirstSource => "firstSource",
            Column::FirstMedium => "firstMedium",
            Column::FirstCampaign => "firstCampaign",
            Column::Source => "source",
            Column::Medium => "medium",
            Column::Campaign => "campaign",
            Column::LandingPage => "landingPage",
            Column::ItemName => "itemName",
            Column::Revenue => "revenue",
        }
    }

    pub fn header(self, labels: &Labels) -> &'static str {
        match self {
            Column::Date => labels.date,
            Column::TransactionId => labels.transaction_id,
            Column::FirstSource => labels.first_source,
            Column::FirstMedium => labels.first_medium,
            Column::FirstCampaign => labels.first_campaign,
            Column::Source => labels.source,
            Column::Medium => labels.medium,
            Column::Campaign => labels.campaign,
            Column::LandingPage => labels.landing_page,
            Column::ItemName => labels.item_name,
            Column::Revenue => labels.revenue,
        }
    }

    /// Compared as numbers when sorting; everything else compares as text.
    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Revenue)
    }

    /// Attribution dimensions render a dash when unset.
    pub fn is_attribution(self) -> bool {
        matches!(
            self,
            Column::FirstSource
                | Column::FirstMedium
                | Column::FirstCampaign
                | Column::Source
                | Column::Medium
                | Column::Campaign
                | Column::LandingPage
        )
    }

    /// Source columns render as coloured badges.
    pub fn is_source(self) -> bool {
        matches!(self, Column::FirstSource | Column::Source)
    }

    pub fn text<'a>(self, row: &'a PurchaseRow) -> Option<&'a str> {
        let text = match self {
            Column::Date => &row.date,
            Column::TransactionId => &row.transaction_id,
            Column::FirstSource => &row.first_source,
            Column::FirstMedium => &row.first_medium,
            Column::FirstCampaign => &row.first_campaign,
            Column::Source => &row.source,
            Column::Medium => &row.medium,
            Column::Campaign => &row.campaign,
            Column::LandingPage => &row.landing_page,
            Column::ItemName => &row.item_name,
            Column::Revenue => return None,
        };
        Some(text.as_str())
    }

    /// String form of the field, as searched and exported.
    pub fn value(self, row: &PurchaseRow) -> String {
        match self.text(row) {
            Some(text) => text.to_string(),
            None => row.revenue.to_string(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}
