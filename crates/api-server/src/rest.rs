//! REST handlers for the purchase report and operational endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dashboard_analytics::AnalyticsSource;
use dashboard_core::{DashboardError, DateRange, ErrorBody, ReportResponse};
use dashboard_reporting::{compute_totals, AttributionResolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use utoipa::{IntoParams, ToSchema};

/// Message returned for any analytics failure; the cause goes in `details`.
pub const UPSTREAM_FAILURE: &str = "Failed to fetch data from Google Analytics";

/// Message returned when no analytics property is configured.
pub const NOT_CONFIGURED: &str = "GA4_PROPERTY_ID is not configured";

pub type Resolver = AttributionResolver<Arc<dyn AnalyticsSource>>;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    /// The configuration error every report request answers with when the
    /// analytics client could not be built.
    pub resolver: Result<Arc<Resolver>, String>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(resolver: Result<Resolver, String>) -> Self {
        Self {
            resolver: resolver.map(Arc::new),
            start_time: Instant::now(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportParams {
    /// First day of the range, e.g. `2024-03-01`.
    pub start_date: Option<String>,
    /// Last day of the range, inclusive.
    pub end_date: Option<String>,
}

/// `DashboardError` rendered as the report endpoint's error contract.
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            DashboardError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            DashboardError::Config(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: message,
                    details: None,
                },
            ),
            other => {
                let details = match other {
                    DashboardError::Upstream(message) => message,
                    other => other.to_string(),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: UPSTREAM_FAILURE.to_string(),
                        details: Some(details),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// GET /api/report: Purchases with resolved attribution for a date range.
#[utoipa::path(
    get,
    path = "/api/report",
    tag = "Reports",
    params(ReportParams),
    responses(
        (status = 200, description = "Resolved purchase rows and totals", body = ReportResponse),
        (status = 400, description = "startDate or endDate missing", body = ErrorBody),
        (status = 500, description = "Not configured or analytics query failed", body = ErrorBody),
    )
)]
pub async fn handle_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportResponse>, ApiError> {
    metrics::counter!("report.requests").increment(1);

    let range = DateRange::new(params.start_date.as_deref(), params.end_date.as_deref())
        .inspect_err(|e| {
            warn!(error = %e, "Report request validation failed");
            metrics::counter!("report.validation_errors").increment(1);
        })?;

    let resolver = match &state.resolver {
        Ok(resolver) => resolver,
        Err(message) => {
            error!(error = %message, "Report requested but analytics is unavailable");
            return Err(DashboardError::Config(message.clone()).into());
        }
    };

    let rows = resolver.resolve(&range).await.inspect_err(|e| {
        error!(error = %e, "GA4 API error");
        metrics::counter!("report.upstream_errors").increment(1);
    })?;

    let totals = compute_totals(&rows);
    info!(
        start_date = %range.start_date,
        end_date = %range.end_date,
        rows = rows.len(),
        transactions = totals.total_transactions,
        "Report served"
    );
    metrics::counter!("report.rows").increment(rows.len() as u64);

    Ok(Json(ReportResponse::new(rows, totals)))
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        analytics_configured: state.resolver.is_ok(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready: Ready once an analytics source is wired in.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Ready to serve reports"),
        (status = 503, description = "Analytics source not configured"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.resolver.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live: Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub analytics_configured: bool,
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let response =
            ApiError(DashboardError::Validation("startDate and endDate are required".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body.error, "startDate and endDate are required");
        assert_eq!(body.details, None);
    }

    #[tokio::test]
    async fn test_upstream_maps_to_generic_failure_with_details() {
        let response =
            ApiError(DashboardError::Upstream("quota exhausted".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body.error, UPSTREAM_FAILURE);
        assert_eq!(body.details.as_deref(), Some("quota exhausted"));
    }

    #[tokio::test]
    async fn test_config_error_has_no_details() {
        let response = ApiError(DashboardError::Config(NOT_CONFIGURED.into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body.error, NOT_CONFIGURED);
        assert_eq!(body.details, None);
    }
}
