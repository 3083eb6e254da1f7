//! OpenAI Chat Completions streaming adapter.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::types::{Metrics, ResponseDelta, ToolCallFragment};

use super::ProviderAdapter;

/// Adapter for the OpenAI Chat Completions streaming wire format.
///
/// OpenAI reports incremental usage: each chunk's `usage` block (when
/// requested via `stream_options.include_usage`) carries only the
/// counts produced since the previous chunk, so snapshots are summed.
pub struct OpenAiAdapter {
    /// Usage-reporting policy override. OpenAI's protocol default is
    /// incremental (false).
    pub is_cumulative_usage: bool,
}

impl OpenAiAdapter {
    pub fn new() -> Self {
        Self {
            is_cumulative_usage: false,
        }
    }
}

impl Default for OpenAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for OpenAiAdapter {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn is_cumulative_usage(&self) -> bool {
        self.is_cumulative_usage
    }

    fn translate(&mut self, data: &str) -> Result<ResponseDelta> {
        translate_chunk(data)
    }
}

/// Shared translation for OpenAI-compatible chunk payloads.
pub(crate) fn translate_chunk(data: &str) -> Result<ResponseDelta> {
    if data.trim() == "[DONE]" {
        return Ok(ResponseDelta::finished());
    }

    let chunk: OpenAiStreamChunk = serde_json::from_str(data)?;

    let mut delta = ResponseDelta::default();
    if let Some(choice) = chunk.choices.into_iter().next() {
        if let Some(content) = choice.delta.content {
            if !content.is_empty() {
                delta.content = Some(content);
            }
        }
        if let Some(reasoning) = choice.delta.reasoning_content {
            if !reasoning.is_empty() {
                delta.reasoning = Some(reasoning);
            }
        }
        for tc in choice.delta.tool_calls.unwrap_or_default() {
            delta.tool_calls.push(ToolCallFragment {
                index: tc.index,
                id: tc.id,
                name: tc.function.as_ref().and_then(|f| f.name.clone()),
                arguments_delta: tc.function.and_then(|f| f.arguments),
            });
        }
        if choice.finish_reason.is_some() {
            delta.is_final = true;
        }
    }
    if let Some(usage) = chunk.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "openai usage chunk"
        );
        delta.usage = Some(usage.into_metrics());
    }

    Ok(delta)
}

// OpenAI wire types (internal). Numeric fields default to 0 when the
// payload omits them so a sparse usage block never skews a merge.

#[derive(Deserialize)]
pub(crate) struct OpenAiStreamChunk {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiStreamChoice {
    delta: OpenAiStreamDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OpenAiStreamDelta {
    content: Option<String>,
    reasoning_content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCallDelta>>,
}

#[derive(Deserialize)]
struct OpenAiToolCallDelta {
    #[serde(default)]
    index: usize,
    id: Option<String>,
    function: Option<OpenAiFunctionDelta>,
}

#[derive(Deserialize)]
struct OpenAiFunctionDelta {
    name: Option<String>,
    arguments: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
    prompt_tokens_details: Option<OpenAiPromptDetails>,
    completion_tokens_details: Option<OpenAiCompletionDetails>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OpenAiPromptDetails {
    cached_tokens: u32,
    audio_tokens: u32,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct OpenAiCompletionDetails {
    reasoning_tokens: u32,
    audio_tokens: u32,
}

impl OpenAiUsage {
    fn into_metrics(self) -> Metrics {
        let prompt = self.prompt_tokens_details.unwrap_or_default();
        let completion = self.completion_tokens_details.unwrap_or_default();
        Metrics {
            input_tokens: self.prompt_tokens,
            output_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
            reasoning_tokens: completion.reasoning_tokens,
            cache_read_tokens: prompt.cached_tokens,
            audio_input_tokens: prompt.audio_tokens,
            audio_output_tokens: completion.audio_tokens,
            ..Default::default()
        }
    }
}
