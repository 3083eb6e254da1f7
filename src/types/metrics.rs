//! Token usage metrics and merge operators.

use serde::{Deserialize, Serialize};

/// Token usage metrics for a generation.
///
/// Counters default to 0; a field the provider never reports stays 0.
/// `total_tokens` is reported and merged like any other counter — it is
/// never recomputed from `input + output`, since providers may fold
/// counts into the total that are not broken out separately.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Metrics {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
    #[serde(default)]
    pub reasoning_tokens: u32,
    #[serde(default)]
    pub cache_read_tokens: u32,
    #[serde(default)]
    pub cache_write_tokens: u32,
    #[serde(default)]
    pub audio_input_tokens: u32,
    #[serde(default)]
    pub audio_output_tokens: u32,
    /// Wall-clock duration of the generation, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Time from request to first streamed token, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_first_token: Option<f64>,
}

impl Metrics {
    /// Merge an incremental snapshot into this one (field-wise sum).
    ///
    /// For providers that report only the newly produced counts per
    /// chunk. `duration` sums; `time_to_first_token` keeps the first
    /// observed value.
    pub fn accumulate(&mut self, other: &Metrics) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.total_tokens += other.total_tokens;
        self.reasoning_tokens += other.reasoning_tokens;
        self.cache_read_tokens += other.cache_read_tokens;
        self.cache_write_tokens += other.cache_write_tokens;
        self.audio_input_tokens += other.audio_input_tokens;
        self.audio_output_tokens += other.audio_output_tokens;
        if let Some(d) = other.duration {
            *self.duration.get_or_insert(0.0) += d;
        }
        if self.time_to_first_token.is_none() {
            self.time_to_first_token = other.time_to_first_token;
        }
    }

    /// Overwrite this value with a cumulative snapshot.
    ///
    /// For providers that repeat the running total in every chunk: the
    /// latest snapshot is authoritative, including fields it leaves at
    /// default.
    pub fn replace(&mut self, other: &Metrics) {
        *self = other.clone();
    }
}
