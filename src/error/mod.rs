//! Error types for Accrue.

use thiserror::Error;

/// Primary error type for all Accrue operations.
///
/// The accumulator itself never fails; errors arise only at the adapter
/// boundary (unparseable wire payloads, unknown providers) or from the
/// stream being consumed.
#[derive(Error, Debug)]
pub enum AccrueError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider error: {provider} — {message}")]
    Provider { provider: String, message: String },

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Stream error: {0}")]
    Stream(String),
}

impl AccrueError {
    /// Create a provider error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AccrueError>;
