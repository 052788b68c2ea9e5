use thiserror::Error;

/// Startup-level failures shared across services.
///
/// Request-level error shapes are owned by each service; this type covers
/// configuration loading and listener binding, which happen before any
/// request is served.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}
