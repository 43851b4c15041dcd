use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Caller supplied an incomplete request; never retried, no upstream call made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing property id or credentials; needs operator intervention.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Either analytics query failed. No partial report is produced.
    #[error("Analytics query error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
