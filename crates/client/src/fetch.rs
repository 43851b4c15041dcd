//! HTTP access to the report endpoint.

use crate::locale::Labels;
use async_trait::async_trait;
use dashboard_core::{DateRange, ErrorBody, ReportResponse};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}")]
    Server {
        status: u16,
        error: Option<String>,
        details: Option<String>,
    },

    #[error("Invalid report payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Message shown in the error region: details, then error, then a
    /// generic fallback.
    pub fn display_message(&self, labels: &Labels) -> String {
        match self {
            FetchError::Server { error, details, .. } => details
                .as_deref()
                .filter(|d| !d.is_empty())
                .or(error.as_deref().filter(|e| !e.is_empty()))
                .unwrap_or(labels.unknown_error)
                .to_string(),
            other => other.to_string(),
        }
    }
}

/// Source of report payloads for the dashboard.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    async fn fetch_report(&self, range: &DateRange) -> Result<ReportResponse, FetchError>;
}

pub struct ReportClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ReportClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(base_url)?.join("/api/report")?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReportFetcher for ReportClient {
    async fn fetch_report(&self, range: &DateRange) -> Result<ReportResponse, FetchError> {
        debug!(start_date = %range.start_date, end_date = %range.end_date, "Fetching report");
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("startDate", range.start_date.as_str()),
                ("endDate", range.end_date.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Report request failed");
            return Err(server_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Decode an error response, tolerating bodies that are not `{error, details}`.
pub fn server_error(status: u16, body: &str) -> FetchError {
    let (error, details) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => (Some(parsed.error), parsed.details),
        Err(_) => (None, None),
    };
    FetchError::Server {
        status,
        error,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::DisplayLanguage;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ReportClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:3000/api/report");
        let client = ReportClient::new("http://reports.internal:8080/").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://reports.internal:8080/api/report");
        assert!(matches!(ReportClient::new("not a url"), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_message_precedence() {
        let labels = Labels::for_language(DisplayLanguage::English);

        let err = server_error(500, r#"{"error": "Failed", "details": "quota exceeded"}"#);
        assert_eq!(err.display_message(labels), "quota exceeded");

        let err = server_error(400, r#"{"error": "startDate and endDate are required"}"#);
        assert_eq!(err.display_message(labels), "startDate and endDate are required");

        let err = server_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.display_message(labels), "Unknown error");

        let err = server_error(500, r#"{"error": "", "details": ""}"#);
        assert_eq!(err.display_message(labels), "Unknown error");
    }
}
