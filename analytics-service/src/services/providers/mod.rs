//! AI provider abstraction.
//!
//! The analysis handler talks to a generative model through the
//! [`TextProvider`] trait so the backend can be swapped (Gemini in
//! production, a mock in tests).

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod mock;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers.
///
/// `parts` is an ordered list of text segments (system instruction first,
/// then the data context) submitted as a single user turn.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate one text completion for the given segments.
    async fn generate(&self, parts: &[String]) -> Result<String, ProviderError>;

    /// Verify the provider is configured and reachable.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
