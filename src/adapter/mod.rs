//! Provider adapters: translate raw wire events into response deltas.

#[cfg(feature = "anthropic")]
pub mod anthropic;
#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "perplexity")]
pub mod perplexity;

use crate::error::{AccrueError, Result};
use crate::types::ResponseDelta;

/// Translates a provider's wire events into [`ResponseDelta`]s.
///
/// `data` is one SSE data payload as framed by the transport (the part
/// after `data: `, already stripped of keep-alive comments). Translation
/// fails on unparseable JSON or on an explicit provider error event; a
/// well-formed event the adapter does not recognize yields an inert
/// delta.
///
/// `is_cumulative_usage` declares which usage-reporting policy the
/// provider's protocol follows. It is a static fact about the wire
/// format, fixed at construction — though concrete adapters expose it as
/// a public field so callers can override it for providers that are
/// inconsistent across model variants.
pub trait ProviderAdapter: Send + Sync {
    /// Provider name (e.g., "openai", "anthropic").
    fn provider_name(&self) -> &str;

    /// Whether this provider reports running totals in every chunk
    /// (true) or only newly produced counts (false).
    fn is_cumulative_usage(&self) -> bool;

    /// Translate one raw wire event into a delta.
    ///
    /// Takes `&mut self`: some protocols split a logical snapshot
    /// across events and the adapter carries the request-side counts
    /// forward so every emitted snapshot is self-contained.
    fn translate(&mut self, data: &str) -> Result<ResponseDelta>;
}

/// Create an adapter for the named provider.
pub fn create_adapter(provider: &str) -> Result<Box<dyn ProviderAdapter>> {
    match provider {
        #[cfg(feature = "openai")]
        "openai" => Ok(Box::new(openai::OpenAiAdapter::new())),
        #[cfg(feature = "anthropic")]
        "anthropic" => Ok(Box::new(anthropic::AnthropicAdapter::new())),
        #[cfg(feature = "google")]
        "google" | "gemini" => Ok(Box::new(google::GoogleAdapter::new())),
        #[cfg(feature = "perplexity")]
        "perplexity" => Ok(Box::new(perplexity::PerplexityAdapter::new())),
        other => Err(AccrueError::ProviderNotFound(other.to_string())),
    }
}
