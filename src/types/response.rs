//! Aggregated response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::delta::ToolCallFragment;
use super::metrics::Metrics;

/// Final (or partial, if the stream was cancelled) aggregate of a
/// streamed response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StreamedResponse {
    /// Full accumulated text.
    pub text: String,
    /// Tool call fragments in arrival order.
    pub tool_call_fragments: Vec<ToolCallFragment>,
    /// Merged usage metrics, absent if no chunk carried usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
    /// Accumulated reasoning trace, absent if the model emitted none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl StreamedResponse {
    /// Reassemble tool call fragments into complete calls.
    ///
    /// Fragments are grouped by index (index order preserved), `id` and
    /// `name` take the last value seen, and `arguments_delta` pieces are
    /// concatenated then parsed as JSON. A buffer that is not valid JSON
    /// is kept as a JSON string. Fragments that never received a name
    /// are dropped.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        let mut pending: BTreeMap<usize, PendingCall> = BTreeMap::new();
        for fragment in &self.tool_call_fragments {
            let entry = pending.entry(fragment.index).or_default();
            if let Some(ref id) = fragment.id {
                entry.id = id.clone();
            }
            if let Some(ref name) = fragment.name {
                entry.name = name.clone();
            }
            if let Some(ref args) = fragment.arguments_delta {
                entry.arguments.push_str(args);
            }
        }

        pending
            .into_values()
            .filter(|call| !call.name.is_empty())
            .map(|call| {
                let arguments = if call.arguments.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_str(&call.arguments)
                        .unwrap_or(serde_json::Value::String(call.arguments))
                };
                ToolCall {
                    id: call.id,
                    name: call.name,
                    arguments,
                }
            })
            .collect()
    }
}

/// A complete tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

#[derive(Default)]
struct PendingCall {
    id: String,
    name: String,
    arguments: String,
}
