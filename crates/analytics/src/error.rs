use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analytics API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode analytics response: {0}")]
    Decode(String),
}
