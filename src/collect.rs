//! Driving a delta stream to completion.
//!
//! The accumulator itself is synchronous; any waiting for the next
//! chunk happens in the transport feeding these loops. Cancelling a
//! stream simply stops delivering deltas — whatever the accumulator
//! held at that point is still a valid (partial) result.

use futures::stream::BoxStream;
use futures::StreamExt;

use crate::accumulator::{StreamAccumulator, UsagePolicy};
use crate::adapter::ProviderAdapter;
use crate::error::Result;
use crate::types::{ResponseDelta, StreamedResponse};

/// Absorb every delta from an async stream and return the final
/// aggregate.
///
/// ```
/// use accrue::accumulator::UsagePolicy;
/// use accrue::collect::collect_stream;
/// use accrue::types::ResponseDelta;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> accrue::error::Result<()> {
/// let deltas = tokio_stream::iter(vec![
///     Ok(ResponseDelta::content("Hello, ")),
///     Ok(ResponseDelta::content("world")),
///     Ok(ResponseDelta::finished()),
/// ]);
/// let response = collect_stream(UsagePolicy::Incremental, Box::pin(deltas)).await?;
/// assert_eq!(response.text, "Hello, world");
/// # Ok(())
/// # }
/// ```
pub async fn collect_stream(
    policy: UsagePolicy,
    mut stream: BoxStream<'static, Result<ResponseDelta>>,
) -> Result<StreamedResponse> {
    let mut accumulator = StreamAccumulator::new(policy);
    while let Some(delta) = stream.next().await {
        accumulator.absorb(delta?);
    }
    Ok(accumulator.into_response())
}

/// Absorb every delta from a synchronous sequence.
pub fn collect_iter(
    policy: UsagePolicy,
    deltas: impl IntoIterator<Item = ResponseDelta>,
) -> StreamedResponse {
    let mut accumulator = StreamAccumulator::new(policy);
    for delta in deltas {
        accumulator.absorb(delta);
    }
    accumulator.into_response()
}

/// Translate raw wire payloads through an adapter and absorb the
/// resulting deltas, using the adapter's capability flag to pick the
/// merge policy.
pub fn collect_events<'a>(
    adapter: &mut dyn ProviderAdapter,
    events: impl IntoIterator<Item = &'a str>,
) -> Result<StreamedResponse> {
    let policy = UsagePolicy::from_cumulative_flag(adapter.is_cumulative_usage());
    let mut accumulator = StreamAccumulator::new(policy);
    for event in events {
        accumulator.absorb(adapter.translate(event)?);
    }
    Ok(accumulator.into_response())
}
