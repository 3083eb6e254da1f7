//! Accrue — streaming response aggregation for LLM providers.
//!
//! Consumes the incremental deltas a provider emits during a streamed
//! generation and folds them into one coherent result: text, tool
//! calls, reasoning content, and usage metrics. Providers disagree on
//! usage semantics — some report per-chunk increments that must be
//! summed, others repeat a running total that must overwrite the prior
//! value — so each adapter declares its policy once and the accumulator
//! dispatches on it.
//!
//! # Quick Start
//!
//! ```
//! use accrue::accumulator::{StreamAccumulator, UsagePolicy};
//! use accrue::types::{Metrics, ResponseDelta};
//!
//! let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
//! acc.absorb(ResponseDelta::content("Hello"));
//! acc.absorb(ResponseDelta::usage(Metrics {
//!     input_tokens: 100,
//!     output_tokens: 1,
//!     total_tokens: 101,
//!     ..Default::default()
//! }));
//! let response = acc.into_response();
//! assert_eq!(response.text, "Hello");
//! assert_eq!(response.metrics.unwrap().total_tokens, 101);
//! ```

pub mod accumulator;
pub mod adapter;
pub mod collect;
pub mod error;
pub mod prelude;
pub mod types;
