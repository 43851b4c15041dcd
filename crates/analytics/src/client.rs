//! Google Analytics Data API client behind the `AnalyticsSource` seam.

use crate::credentials::{ServiceAccountKey, TokenProvider};
use crate::error::AnalyticsError;
use crate::query::{ReportQuery, ReportResult};
use async_trait::async_trait;
use dashboard_core::config::AnalyticsConfig;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// An analytics query service accepting property-scoped report queries.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn run_report(&self, query: &ReportQuery) -> Result<ReportResult, AnalyticsError>;
}

#[async_trait]
impl<T: AnalyticsSource + ?Sized> AnalyticsSource for Arc<T> {
    async fn run_report(&self, query: &ReportQuery) -> Result<ReportResult, AnalyticsError> {
        (**self).run_report(query).await
    }
}

/// Normalizes `123` and `properties/123` to the resource name form.
pub fn property_resource(property_id: &str) -> String {
    let id = property_id.trim();
    if id.starts_with("properties/") {
        id.to_string()
    } else {
        format!("properties/{id}")
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

pub struct Ga4Client {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
}

impl Ga4Client {
    /// Build a client from configuration, loading the service-account key.
    pub fn new(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        let key = ServiceAccountKey::from_config(config)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        info!(
            client_email = %key.client_email,
            base_url = %config.api_base_url,
            "Analytics Data API client initialized"
        );

        Ok(Self {
            tokens: TokenProvider::new(key, http.clone()),
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, property: &str) -> String {
        format!("{}/v1beta/{}:runReport", self.base_url, property_resource(property))
    }
}

#[async_trait]
impl AnalyticsSource for Ga4Client {
    async fn run_report(&self, query: &ReportQuery) -> Result<ReportResult, AnalyticsError> {
        let token = self.tokens.access_token().await?;
        let url = self.endpoint(&query.property);
        debug!(url = %url, dimensions = query.dimensions.len(), "Running analytics report");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            metrics::counter!("analytics.api_errors").increment(1);
            return Err(AnalyticsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let result: ReportResult = response
            .json()
            .await
            .map_err(|e| AnalyticsError::Decode(e.to_string()))?;

        if result.is_truncated() {
            warn!(
                returned = result.rows.len(),
                total = result.row_count,
                limit = ?query.limit,
                "Analytics report truncated by row limit"
            );
        }
        metrics::counter!("analytics.reports").increment(1);

        Ok(result)
    }
}
