//! Perplexity streaming adapter.

use crate::error::Result;
use crate::types::ResponseDelta;

use super::openai::translate_chunk;
use super::ProviderAdapter;

/// Adapter for Perplexity's OpenAI-compatible streaming wire format.
///
/// The chunk shape matches OpenAI Chat Completions, but the `usage`
/// block repeats the running totals on every chunk rather than the
/// per-chunk increments, so the policy is cumulative.
pub struct PerplexityAdapter {
    /// Usage-reporting policy override. Perplexity's protocol default is
    /// cumulative (true).
    pub is_cumulative_usage: bool,
}

impl PerplexityAdapter {
    pub fn new() -> Self {
        Self {
            is_cumulative_usage: true,
        }
    }
}

impl Default for PerplexityAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for PerplexityAdapter {
    fn provider_name(&self) -> &str {
        "perplexity"
    }

    fn is_cumulative_usage(&self) -> bool {
        self.is_cumulative_usage
    }

    fn translate(&mut self, data: &str) -> Result<ResponseDelta> {
        translate_chunk(data)
    }
}
