//! Purchase Dashboard: serves the attribution report API and the dashboard
//! assets.

use clap::Parser;
use dashboard_analytics::{AnalyticsSource, Ga4Client};
use dashboard_api::rest::{Resolver, NOT_CONFIGURED};
use dashboard_api::ApiServer;
use dashboard_core::config::AppConfig;
use dashboard_reporting::AttributionResolver;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "purchase-dashboard")]
#[command(about = "Purchase attribution dashboard backed by Google Analytics 4")]
#[command(version)]
struct Cli {
    /// HTTP port (overrides config)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// GA4 property id, numeric or `properties/<id>` (overrides config)
    #[arg(long, env = "GA4_PROPERTY_ID")]
    property_id: Option<String>,

    /// Service-account key JSON (takes precedence over the key file)
    #[arg(long, env = "GOOGLE_CREDENTIALS", hide_env_values = true)]
    credentials: Option<String>,

    /// Path to the service-account key file (overrides config)
    #[arg(long)]
    credentials_file: Option<String>,

    /// Directory of static dashboard assets (overrides config)
    #[arg(long)]
    static_dir: Option<String>,

    /// Start the Prometheus exporter
    #[arg(long, default_value_t = false)]
    metrics: bool,
}

/// Wire the analytics client into a resolver. On failure the error is the
/// message every report request answers with.
fn build_resolver(config: &AppConfig) -> Result<Resolver, String> {
    if !config.analytics.is_configured() {
        warn!("GA4_PROPERTY_ID is not set; /api/report will return a configuration error");
        return Err(NOT_CONFIGURED.to_string());
    }

    match Ga4Client::new(&config.analytics) {
        Ok(client) => {
            let source: Arc<dyn AnalyticsSource> = Arc::new(client);
            Ok(AttributionResolver::new(
                source,
                config.analytics.property_id.clone(),
                config.analytics.row_limit,
            ))
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize analytics client");
            Err(format!("Analytics client could not be initialized: {e}"))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "purchase_dashboard=info,dashboard_api=info,dashboard_reporting=info,tower_http=info"
                    .into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Purchase Dashboard starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(port) = cli.port {
        config.api.http_port = port;
    }
    if let Some(property_id) = cli.property_id {
        config.analytics.property_id = property_id;
    }
    if let Some(credentials) = cli.credentials {
        config.analytics.credentials_json = Some(credentials);
    }
    if let Some(path) = cli.credentials_file {
        config.analytics.credentials_file = path;
    }
    if let Some(dir) = cli.static_dir {
        config.api.static_dir = dir;
    }
    if cli.metrics {
        config.metrics.enabled = true;
    }

    info!(
        http_port = config.api.http_port,
        property = %config.analytics.property_id,
        inline_credentials = config.analytics.credentials_json.is_some(),
        "Configuration loaded"
    );

    let resolver = build_resolver(&config);
    let api_server = ApiServer::new(config.clone(), resolver);

    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics() {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    // Blocks until shutdown
    api_server.start_http().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_property_is_not_configured() {
        let config = AppConfig::default();
        assert_eq!(build_resolver(&config).err().as_deref(), Some(NOT_CONFIGURED));
    }

    #[test]
    fn test_unreadable_credentials_keep_their_cause() {
        let mut config = AppConfig::default();
        config.analytics.property_id = "123".into();
        config.analytics.credentials_json = None;
        config.analytics.credentials_file = "/nonexistent/credentials.json".into();

        let message = build_resolver(&config).err().unwrap();
        assert_ne!(message, NOT_CONFIGURED);
        assert!(message.contains("/nonexistent/credentials.json"), "{message}");
    }
}
