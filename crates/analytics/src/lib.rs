#![warn(clippy::unwrap_used)]

//! Boundary to the external analytics query service: query model, the
//! `AnalyticsSource` seam, and the Google Analytics Data API client.

pub mod client;
pub mod credentials;
pub mod error;
pub mod query;

pub use client::{AnalyticsSource, Ga4Client};
pub use credentials::{ServiceAccountKey, TokenProvider};
pub use error::AnalyticsError;
pub use query::{FilterExpression, ReportQuery, ReportResult, ResultRow};
