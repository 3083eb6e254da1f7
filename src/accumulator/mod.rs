//! Stream accumulator: folds deltas into one coherent response.

use strum::{Display, EnumString};
use tracing::trace;

use crate::types::{Metrics, ResponseDelta, StreamedResponse, ToolCallFragment};

/// How usage snapshots from successive chunks combine.
///
/// Chosen from the provider's `is_cumulative_usage` capability flag: a
/// protocol property of the provider's wire format, not a per-request
/// variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UsagePolicy {
    /// Chunks report only newly produced counts; snapshots are summed.
    #[default]
    Incremental,
    /// Chunks repeat the running total; the latest snapshot wins.
    Cumulative,
}

impl UsagePolicy {
    /// Map a provider's `is_cumulative_usage` flag to a policy.
    pub fn from_cumulative_flag(is_cumulative: bool) -> Self {
        if is_cumulative {
            Self::Cumulative
        } else {
            Self::Incremental
        }
    }
}

/// Mutable aggregate of all deltas seen so far for one in-flight
/// generation request.
///
/// One instance per request: created at request start, fed once per
/// delta via [`absorb`](Self::absorb) in arrival order, read at stream
/// end, then discarded. Not reused across requests. Deltas must be
/// applied sequentially; there is no reordering buffer and no internal
/// locking — concurrent requests use independent instances.
#[derive(Debug, Clone)]
pub struct StreamAccumulator {
    policy: UsagePolicy,
    text: String,
    tool_call_fragments: Vec<ToolCallFragment>,
    metrics: Option<Metrics>,
    reasoning: Option<String>,
    finished: bool,
}

impl StreamAccumulator {
    /// Create an accumulator with the given usage merge policy.
    pub fn new(policy: UsagePolicy) -> Self {
        Self {
            policy,
            text: String::new(),
            tool_call_fragments: Vec::new(),
            metrics: None,
            reasoning: None,
            finished: false,
        }
    }

    /// Create an accumulator matching a provider's capability flag.
    pub fn for_adapter(adapter: &dyn crate::adapter::ProviderAdapter) -> Self {
        Self::new(UsagePolicy::from_cumulative_flag(adapter.is_cumulative_usage()))
    }

    /// The policy this accumulator merges usage with.
    pub fn policy(&self) -> UsagePolicy {
        self.policy
    }

    /// Fold one delta into the aggregate.
    ///
    /// Each part is applied independently by presence; a delta with all
    /// parts absent is a no-op. The first usage snapshot always
    /// initializes the metrics regardless of policy (there is nothing to
    /// merge against yet); later snapshots are summed or replace the
    /// prior value per [`UsagePolicy`]. Never fails: malformed-but-
    /// well-typed input is merged best-effort per field presence.
    pub fn absorb(&mut self, delta: ResponseDelta) {
        if let Some(content) = delta.content {
            self.text.push_str(&content);
        }
        self.tool_call_fragments.extend(delta.tool_calls);
        if let Some(usage) = delta.usage {
            match self.metrics {
                None => {
                    trace!(policy = %self.policy, "initializing response metrics");
                    self.metrics = Some(usage);
                }
                Some(ref mut metrics) => match self.policy {
                    UsagePolicy::Incremental => metrics.accumulate(&usage),
                    UsagePolicy::Cumulative => metrics.replace(&usage),
                },
            }
        }
        if let Some(reasoning) = delta.reasoning {
            self.reasoning.get_or_insert_with(String::new).push_str(&reasoning);
        }
        if delta.is_final {
            self.finished = true;
        }
    }

    /// Whether a delta marked the stream as finished.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Clone the current aggregate state.
    ///
    /// Valid at any point — after cancellation this is the partial
    /// result; there is no rollback.
    pub fn snapshot(&self) -> StreamedResponse {
        StreamedResponse {
            text: self.text.clone(),
            tool_call_fragments: self.tool_call_fragments.clone(),
            metrics: self.metrics.clone(),
            reasoning: self.reasoning.clone(),
        }
    }

    /// Consume the accumulator into the final response.
    pub fn into_response(self) -> StreamedResponse {
        StreamedResponse {
            text: self.text,
            tool_call_fragments: self.tool_call_fragments,
            metrics: self.metrics,
            reasoning: self.reasoning,
        }
    }
}

impl Default for StreamAccumulator {
    fn default() -> Self {
        Self::new(UsagePolicy::Incremental)
    }
}
