//! Google Gemini streaming adapter.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::types::{Metrics, ResponseDelta, ToolCallFragment};

use super::ProviderAdapter;

/// Adapter for the Gemini `streamGenerateContent` wire format.
///
/// Gemini reports cumulative usage: `usageMetadata` on every chunk
/// carries the running totals, so the latest snapshot is authoritative.
/// Function calls arrive whole in a single part, emitted here as one
/// complete fragment per call.
pub struct GoogleAdapter {
    /// Usage-reporting policy override. Gemini's protocol default is
    /// cumulative (true).
    pub is_cumulative_usage: bool,
    next_tool_index: usize,
}

impl GoogleAdapter {
    pub fn new() -> Self {
        Self {
            is_cumulative_usage: true,
            next_tool_index: 0,
        }
    }
}

impl Default for GoogleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for GoogleAdapter {
    fn provider_name(&self) -> &str {
        "google"
    }

    fn is_cumulative_usage(&self) -> bool {
        self.is_cumulative_usage
    }

    fn translate(&mut self, data: &str) -> Result<ResponseDelta> {
        let chunk: GeminiStreamResponse = serde_json::from_str(data)?;

        let mut delta = ResponseDelta::default();
        if let Some(candidate) = chunk.candidates.into_iter().next() {
            let mut text = String::new();
            let mut reasoning = String::new();
            for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
                if let Some(t) = part.text {
                    if part.thought {
                        reasoning.push_str(&t);
                    } else {
                        text.push_str(&t);
                    }
                }
                if let Some(call) = part.function_call {
                    let args = call.args.unwrap_or(serde_json::Value::Null);
                    delta.tool_calls.push(ToolCallFragment {
                        index: self.next_tool_index,
                        id: None,
                        name: Some(call.name),
                        arguments_delta: Some(args.to_string()),
                    });
                    self.next_tool_index += 1;
                }
            }
            if !text.is_empty() {
                delta.content = Some(text);
            }
            if !reasoning.is_empty() {
                delta.reasoning = Some(reasoning);
            }
            if candidate.finish_reason.is_some() {
                delta.is_final = true;
            }
        }
        if let Some(usage) = chunk.usage_metadata {
            debug!(
                total_tokens = usage.total_token_count,
                "gemini usage metadata"
            );
            delta.usage = Some(usage.into_metrics());
        }

        Ok(delta)
    }
}

// Internal Gemini wire types.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiStreamResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
    function_call: Option<GeminiFunctionCall>,
}

#[derive(Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: Option<serde_json::Value>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GeminiUsage {
    prompt_token_count: u32,
    candidates_token_count: u32,
    total_token_count: u32,
    thoughts_token_count: u32,
    cached_content_token_count: u32,
}

impl GeminiUsage {
    fn into_metrics(self) -> Metrics {
        Metrics {
            input_tokens: self.prompt_token_count,
            output_tokens: self.candidates_token_count,
            total_tokens: self.total_token_count,
            reasoning_tokens: self.thoughts_token_count,
            cache_read_tokens: self.cached_content_token_count,
            ..Default::default()
        }
    }
}
