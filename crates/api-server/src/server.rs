//! API server: report endpoint, probes, Swagger UI and static assets.

use crate::rest::{self, AppState, Resolver};
use crate::swagger::ApiDoc;
use axum::routing::get;
use axum::Router;
use dashboard_core::config::AppConfig;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP router. Anything not matched by an API route is served
/// from `static_dir`. The browser assets are not shipped with the server;
/// the deployment provides them there.
pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/api/report", get(rest::handle_report))
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(static_dir))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// True when `static_dir` has an `index.html` to serve at `/`.
pub fn has_static_assets(static_dir: &str) -> bool {
    Path::new(static_dir).join("index.html").is_file()
}

pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    /// `resolver` carries the configuration error to report when the
    /// analytics client is unavailable.
    pub fn new(config: AppConfig, resolver: Result<Resolver, String>) -> Self {
        Self {
            config,
            state: AppState::new(resolver),
        }
    }

    /// Start the HTTP server; runs until the listener fails.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = router(self.state.clone(), &self.config.api.static_dir);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(
            addr = %addr,
            static_dir = %self.config.api.static_dir,
            analytics_configured = self.state.resolver.is_ok(),
            "Dashboard running"
        );

        if !has_static_assets(&self.config.api.static_dir) {
            warn!(
                static_dir = %self.config.api.static_dir,
                "No index.html in static_dir; only the API routes will answer"
            );
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus exporter on its own port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
