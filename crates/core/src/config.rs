use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `PURCHASE_DASHBOARD__` and an optional `dashboard.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Directory holding the browser client's static assets. They are
    /// supplied by the deployment, not built into the server.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Numeric property id, with or without the `properties/` prefix.
    #[serde(default)]
    pub property_id: String,
    /// Inline service-account key JSON. Wins over `credentials_file`.
    #[serde(default)]
    pub credentials_json: Option<String>,
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_row_limit")]
    pub row_limit: u32,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    Hebrew,
    English,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub language: DisplayLanguage,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    3000
}
fn default_static_dir() -> String {
    "public".to_string()
}
fn default_credentials_file() -> String {
    "credentials.json".to_string()
}
fn default_api_base_url() -> String {
    "https://analyticsdata.googleapis.com".to_string()
}
fn default_row_limit() -> u32 {
    10000
}
fn default_request_timeout_ms() -> u64 {
    30_000
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_currency_symbol() -> String {
    "₪".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            property_id: String::new(),
            credentials_json: None,
            credentials_file: default_credentials_file(),
            api_base_url: default_api_base_url(),
            row_limit: default_row_limit(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: DisplayLanguage::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl AnalyticsConfig {
    /// True once a property id has been supplied.
    pub fn is_configured(&self) -> bool {
        !self.property_id.trim().is_empty()
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("dashboard").required(false))
            .add_source(
                config::Environment::with_prefix("PURCHASE_DASHBOARD")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
