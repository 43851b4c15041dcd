//! Service-account credentials and the OAuth2 access-token cache.
//!
//! A signed RS256 assertion is exchanged at the key's token endpoint for a
//! bearer token. The token is reused until shortly before it expires.

use crate::error::AnalyticsError;
use chrono::{DateTime, Duration, Utc};
use dashboard_core::config::AnalyticsConfig;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        serde_json::from_str(json)
            .map_err(|e| AnalyticsError::Credentials(format!("invalid service account key: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Inline JSON takes precedence over the key file.
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        match config.credentials_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => {
                debug!("Using inline service account credentials");
                Self::from_json(json)
            }
            _ => {
                debug!(path = %config.credentials_file, "Using service account key file");
                Self::from_file(&config.credentials_file)
            }
        }
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Process-wide access-token source, shared read-only between requests.
pub struct TokenProvider {
    key: ServiceAccountKey,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Self {
        Self {
            key,
            http,
            cached: Mutex::new(None),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Return a valid bearer token, exchanging a new assertion when needed.
    pub async fn access_token(&self) -> Result<String, AnalyticsError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.access_token.clone());
        }

        let fresh = self.request_token().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, AnalyticsError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: ANALYTICS_READONLY_SCOPE,
            aud: self.key.token_uri(),
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| AnalyticsError::Credentials(format!("invalid private key: {e}")))?;
        encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| AnalyticsError::Credentials(format!("failed to sign assertion: {e}")))
    }

    async fn request_token(&self) -> Result<CachedToken, AnalyticsError> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        let response = self
            .http
            .post(self.key.token_uri())
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyticsError::Credentials(format!(
                "token exchange failed with {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AnalyticsError::Decode(format!("token response: {e}")))?;
        let lifetime = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);

        info!(client_email = %self.key.client_email, expires_in = lifetime, "Obtained analytics access token");
        metrics::counter!("analytics.token_refreshes").increment(1);

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}
