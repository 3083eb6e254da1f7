//! Delta types emitted by provider adapters during streaming.

use serde::{Deserialize, Serialize};

use super::metrics::Metrics;

/// One increment of streamed model output.
///
/// Every part is optional; a delta with all parts absent is legal and
/// inert. Deltas are created fresh per wire event by an adapter and
/// consumed immediately by the accumulator.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResponseDelta {
    /// Incremental text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool call fragments carried by this chunk, in wire order.
    /// Providers that support parallel calls may deliver several whole
    /// calls in one chunk.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallFragment>,
    /// Usage snapshot for this chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Metrics>,
    /// Incremental reasoning/thinking content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Set on the last delta of a stream. Informational only.
    #[serde(default)]
    pub is_final: bool,
}

impl ResponseDelta {
    /// Delta carrying a text fragment.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Default::default()
        }
    }

    /// Delta carrying a reasoning fragment.
    pub fn reasoning(text: impl Into<String>) -> Self {
        Self {
            reasoning: Some(text.into()),
            ..Default::default()
        }
    }

    /// Delta carrying a usage snapshot.
    pub fn usage(metrics: Metrics) -> Self {
        Self {
            usage: Some(metrics),
            ..Default::default()
        }
    }

    /// Delta carrying a single tool call fragment.
    pub fn tool_call(fragment: ToolCallFragment) -> Self {
        Self {
            tool_calls: vec![fragment],
            ..Default::default()
        }
    }

    /// Delta marking the end of the stream.
    pub fn finished() -> Self {
        Self {
            is_final: true,
            ..Default::default()
        }
    }

    /// True when no part is present.
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.tool_calls.is_empty()
            && self.usage.is_none()
            && self.reasoning.is_none()
            && !self.is_final
    }
}

/// A fragment of a tool call under construction.
///
/// Fragments belonging to the same logical call share an `index`;
/// `id` and `name` typically arrive on the first fragment and
/// `arguments_delta` carries partial JSON across the rest. Reassembly
/// is done by the consumer, see [`StreamedResponse::tool_calls`].
///
/// [`StreamedResponse::tool_calls`]: super::response::StreamedResponse::tool_calls
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ToolCallFragment {
    /// Correlation key within the stream.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Partial JSON text of the call arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments_delta: Option<String>,
}
