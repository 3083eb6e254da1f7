//! Anthropic Messages API streaming adapter.

use serde_json::Value;
use tracing::debug;

use crate::error::{AccrueError, Result};
use crate::types::{Metrics, ResponseDelta, ToolCallFragment};

use super::ProviderAdapter;

/// Adapter for the Anthropic Messages streaming wire format.
///
/// Anthropic reports cumulative usage: every `usage` block repeats the
/// running totals, so the latest snapshot is authoritative. The wire
/// splits a logical snapshot across events — request-side counts arrive
/// once in `message_start`, output totals in each `message_delta` — so
/// the adapter folds the request-side counts into later snapshots to
/// keep every emitted snapshot self-contained.
pub struct AnthropicAdapter {
    /// Usage-reporting policy override. Anthropic's protocol default is
    /// cumulative (true).
    pub is_cumulative_usage: bool,
    request_usage: Metrics,
}

impl AnthropicAdapter {
    pub fn new() -> Self {
        Self {
            is_cumulative_usage: true,
            request_usage: Metrics::default(),
        }
    }

    fn snapshot_with_output(&self, output_tokens: u32) -> Metrics {
        let mut metrics = self.request_usage.clone();
        metrics.output_tokens = output_tokens;
        metrics.total_tokens = metrics.input_tokens + output_tokens;
        metrics
    }
}

impl Default for AnthropicAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderAdapter for AnthropicAdapter {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn is_cumulative_usage(&self) -> bool {
        self.is_cumulative_usage
    }

    fn translate(&mut self, data: &str) -> Result<ResponseDelta> {
        let event: Value = serde_json::from_str(data)?;
        let event_type = event.get("type").and_then(|t| t.as_str()).unwrap_or("");

        match event_type {
            "message_start" => {
                if let Some(usage) = event.get("message").and_then(|m| m.get("usage")) {
                    self.request_usage = Metrics {
                        input_tokens: read_u32(usage, "input_tokens"),
                        cache_read_tokens: read_u32(usage, "cache_read_input_tokens"),
                        cache_write_tokens: read_u32(usage, "cache_creation_input_tokens"),
                        ..Default::default()
                    };
                    debug!(
                        input_tokens = self.request_usage.input_tokens,
                        "anthropic message_start usage"
                    );
                    let output = read_u32(usage, "output_tokens");
                    return Ok(ResponseDelta::usage(self.snapshot_with_output(output)));
                }
                Ok(ResponseDelta::default())
            }
            "content_block_start" => {
                if let Some(block) = event.get("content_block") {
                    if block.get("type").and_then(|t| t.as_str()) == Some("tool_use") {
                        let index = event.get("index").and_then(|i| i.as_u64()).unwrap_or(0);
                        return Ok(ResponseDelta::tool_call(ToolCallFragment {
                            index: index as usize,
                            id: block.get("id").and_then(|v| v.as_str()).map(String::from),
                            name: block.get("name").and_then(|v| v.as_str()).map(String::from),
                            arguments_delta: None,
                        }));
                    }
                }
                Ok(ResponseDelta::default())
            }
            "content_block_delta" => {
                let Some(delta) = event.get("delta") else {
                    return Ok(ResponseDelta::default());
                };
                match delta.get("type").and_then(|t| t.as_str()).unwrap_or("") {
                    "text_delta" => Ok(delta
                        .get("text")
                        .and_then(|t| t.as_str())
                        .map(ResponseDelta::content)
                        .unwrap_or_default()),
                    "thinking_delta" => Ok(delta
                        .get("thinking")
                        .and_then(|t| t.as_str())
                        .map(ResponseDelta::reasoning)
                        .unwrap_or_default()),
                    "input_json_delta" => {
                        let index = event.get("index").and_then(|i| i.as_u64()).unwrap_or(0);
                        Ok(delta
                            .get("partial_json")
                            .and_then(|j| j.as_str())
                            .map(|json| {
                                ResponseDelta::tool_call(ToolCallFragment {
                                    index: index as usize,
                                    id: None,
                                    name: None,
                                    arguments_delta: Some(json.to_string()),
                                })
                            })
                            .unwrap_or_default())
                    }
                    _ => Ok(ResponseDelta::default()),
                }
            }
            "message_delta" => {
                let mut delta = ResponseDelta::default();
                if let Some(usage) = event.get("usage") {
                    let output = read_u32(usage, "output_tokens");
                    delta.usage = Some(self.snapshot_with_output(output));
                }
                let stop = event
                    .get("delta")
                    .and_then(|d| d.get("stop_reason"))
                    .and_then(|s| s.as_str());
                if stop.is_some() {
                    delta.is_final = true;
                }
                Ok(delta)
            }
            "message_stop" => Ok(ResponseDelta::finished()),
            "error" => {
                let message = event
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown error");
                Err(AccrueError::provider("anthropic", message))
            }
            // ping, content_block_stop, and anything unrecognized
            _ => Ok(ResponseDelta::default()),
        }
    }
}

fn read_u32(value: &Value, field: &str) -> u32 {
    value.get(field).and_then(|v| v.as_u64()).unwrap_or(0) as u32
}
