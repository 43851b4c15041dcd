//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Purchase Dashboard API",
        version = "0.1.0",
        description = "Purchases with first-touch and session attribution, resolved from Google Analytics 4.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Reports", description = "Purchase report for a date range"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        crate::rest::handle_report,
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        dashboard_core::PurchaseRow,
        dashboard_core::ReportTotals,
        dashboard_core::ReportResponse,
        dashboard_core::ErrorBody,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
