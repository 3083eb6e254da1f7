//! Convenience re-exports for common use.

pub use crate::accumulator::{StreamAccumulator, UsagePolicy};
pub use crate::adapter::{create_adapter, ProviderAdapter};
pub use crate::collect::{collect_events, collect_iter, collect_stream};
pub use crate::error::{AccrueError, Result};
pub use crate::types::{Metrics, ResponseDelta, StreamedResponse, ToolCall, ToolCallFragment};
