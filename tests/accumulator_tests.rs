//! Tests for the stream accumulator and its usage merge policies.

use accrue::accumulator::{StreamAccumulator, UsagePolicy};
use accrue::types::{Metrics, ResponseDelta, ToolCallFragment};

fn usage(input: u32, output: u32, total: u32) -> ResponseDelta {
    ResponseDelta::usage(Metrics {
        input_tokens: input,
        output_tokens: output,
        total_tokens: total,
        ..Default::default()
    })
}

#[test]
fn incremental_policy_sums_snapshots_across_the_stream() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(usage(100, 1, 101));
    acc.absorb(usage(0, 1, 1));
    acc.absorb(usage(0, 1, 1));

    let metrics = acc.into_response().metrics.unwrap();
    assert_eq!(metrics.input_tokens, 100);
    assert_eq!(metrics.output_tokens, 3);
    assert_eq!(metrics.total_tokens, 103);
}

#[test]
fn cumulative_policy_keeps_only_the_last_snapshot() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Cumulative);
    acc.absorb(usage(1965, 1, 1966));
    acc.absorb(usage(1965, 14, 1979));
    acc.absorb(usage(1965, 29, 1994));

    let metrics = acc.into_response().metrics.unwrap();
    assert_eq!(metrics.input_tokens, 1965);
    assert_eq!(metrics.output_tokens, 29);
    assert_eq!(metrics.total_tokens, 1994);
}

#[test]
fn first_usage_snapshot_initializes_under_both_policies() {
    for policy in [UsagePolicy::Incremental, UsagePolicy::Cumulative] {
        let mut acc = StreamAccumulator::new(policy);
        acc.absorb(usage(100, 5, 105));

        let metrics = acc.snapshot().metrics.unwrap();
        assert_eq!(metrics.input_tokens, 100, "policy {policy}");
        assert_eq!(metrics.output_tokens, 5, "policy {policy}");
        assert_eq!(metrics.total_tokens, 105, "policy {policy}");
    }
}

#[test]
fn deltas_without_usage_never_touch_metrics() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(ResponseDelta::content("hello"));
    assert!(acc.snapshot().metrics.is_none());

    acc.absorb(usage(10, 2, 12));
    acc.absorb(ResponseDelta::content(" world"));
    acc.absorb(ResponseDelta::reasoning("thinking"));

    let metrics = acc.snapshot().metrics.unwrap();
    assert_eq!(metrics.input_tokens, 10);
    assert_eq!(metrics.output_tokens, 2);
}

#[test]
fn inert_delta_between_usage_chunks_does_not_change_the_result() {
    let mut consecutive = StreamAccumulator::new(UsagePolicy::Incremental);
    consecutive.absorb(usage(100, 1, 101));
    consecutive.absorb(usage(0, 2, 2));

    let mut interleaved = StreamAccumulator::new(UsagePolicy::Incremental);
    interleaved.absorb(usage(100, 1, 101));
    interleaved.absorb(ResponseDelta::default());
    interleaved.absorb(usage(0, 2, 2));

    assert_eq!(consecutive.into_response(), interleaved.into_response());
}

#[test]
fn detailed_counters_follow_the_incremental_policy() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(ResponseDelta::usage(Metrics {
        input_tokens: 100,
        output_tokens: 5,
        total_tokens: 105,
        reasoning_tokens: 10,
        cache_read_tokens: 50,
        ..Default::default()
    }));
    acc.absorb(ResponseDelta::usage(Metrics {
        output_tokens: 3,
        total_tokens: 3,
        reasoning_tokens: 5,
        ..Default::default()
    }));

    let metrics = acc.into_response().metrics.unwrap();
    assert_eq!(metrics.reasoning_tokens, 15);
    assert_eq!(metrics.cache_read_tokens, 50);
}

#[test]
fn detailed_counters_follow_the_cumulative_policy() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Cumulative);
    acc.absorb(ResponseDelta::usage(Metrics {
        input_tokens: 100,
        output_tokens: 5,
        total_tokens: 105,
        reasoning_tokens: 10,
        cache_read_tokens: 50,
        ..Default::default()
    }));
    acc.absorb(ResponseDelta::usage(Metrics {
        input_tokens: 100,
        output_tokens: 10,
        total_tokens: 110,
        reasoning_tokens: 20,
        cache_read_tokens: 50,
        ..Default::default()
    }));

    let metrics = acc.into_response().metrics.unwrap();
    assert_eq!(metrics.output_tokens, 10);
    assert_eq!(metrics.reasoning_tokens, 20);
    assert_eq!(metrics.cache_read_tokens, 50);
}

#[test]
fn text_and_reasoning_append_in_arrival_order() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(ResponseDelta::content("one "));
    acc.absorb(usage(1, 1, 2));
    acc.absorb(ResponseDelta::reasoning("first, "));
    acc.absorb(ResponseDelta::content("two "));
    acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
        index: 0,
        id: Some("call_1".to_string()),
        name: Some("lookup".to_string()),
        arguments_delta: None,
    }));
    acc.absorb(ResponseDelta::reasoning("then second"));
    acc.absorb(ResponseDelta::content("three"));

    let response = acc.into_response();
    assert_eq!(response.text, "one two three");
    assert_eq!(response.reasoning.as_deref(), Some("first, then second"));
}

#[test]
fn tool_call_fragments_keep_arrival_order() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    for (index, args) in [(0, "{\"a\""), (1, "{\"b\""), (0, ":1}"), (1, ":2}")] {
        acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
            index,
            id: None,
            name: None,
            arguments_delta: Some(args.to_string()),
        }));
    }

    let response = acc.into_response();
    let deltas: Vec<_> = response
        .tool_call_fragments
        .iter()
        .map(|f| f.arguments_delta.as_deref().unwrap())
        .collect();
    assert_eq!(deltas, ["{\"a\"", "{\"b\"", ":1}", ":2}"]);
}

#[test]
fn reassembled_tool_calls_group_by_index() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
        index: 0,
        id: Some("call_a".to_string()),
        name: Some("read_file".to_string()),
        arguments_delta: Some("{\"path\":".to_string()),
    }));
    acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
        index: 1,
        id: Some("call_b".to_string()),
        name: Some("send_message".to_string()),
        arguments_delta: Some("{\"text\":\"hi\"}".to_string()),
    }));
    acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
        index: 0,
        id: None,
        name: None,
        arguments_delta: Some("\"a.txt\"}".to_string()),
    }));

    let calls = acc.into_response().tool_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].id, "call_a");
    assert_eq!(calls[0].name, "read_file");
    assert_eq!(calls[0].arguments, serde_json::json!({"path": "a.txt"}));
    assert_eq!(calls[1].name, "send_message");
    assert_eq!(calls[1].arguments, serde_json::json!({"text": "hi"}));
}

#[test]
fn unnamed_fragments_are_dropped_and_bad_json_falls_back_to_string() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
        index: 3,
        id: None,
        name: None,
        arguments_delta: Some("{\"orphan\":true}".to_string()),
    }));
    acc.absorb(ResponseDelta::tool_call(ToolCallFragment {
        index: 5,
        id: Some("call_x".to_string()),
        name: Some("fetch".to_string()),
        arguments_delta: Some("not json".to_string()),
    }));

    let calls = acc.into_response().tool_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "fetch");
    assert_eq!(calls[0].arguments, serde_json::Value::String("not json".to_string()));
}

#[test]
fn final_delta_marks_the_stream_finished_without_changing_state() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Cumulative);
    acc.absorb(ResponseDelta::content("done"));
    acc.absorb(usage(10, 5, 15));
    assert!(!acc.is_finished());

    let before = acc.snapshot();
    acc.absorb(ResponseDelta::finished());

    assert!(acc.is_finished());
    assert_eq!(acc.snapshot(), before);
}

#[test]
fn snapshot_mid_stream_is_a_valid_partial_result() {
    let mut acc = StreamAccumulator::new(UsagePolicy::Incremental);
    acc.absorb(ResponseDelta::content("partial"));
    acc.absorb(usage(50, 2, 52));

    // Cancellation stops delivery; last-known state stands.
    let partial = acc.snapshot();
    assert_eq!(partial.text, "partial");
    assert_eq!(partial.metrics.unwrap().input_tokens, 50);
}

#[test]
fn usage_policy_parses_from_strings() {
    assert_eq!("incremental".parse::<UsagePolicy>().unwrap(), UsagePolicy::Incremental);
    assert_eq!("cumulative".parse::<UsagePolicy>().unwrap(), UsagePolicy::Cumulative);
    assert_eq!(UsagePolicy::Cumulative.to_string(), "cumulative");
}

#[test]
fn usage_policy_maps_from_capability_flag() {
    assert_eq!(UsagePolicy::from_cumulative_flag(false), UsagePolicy::Incremental);
    assert_eq!(UsagePolicy::from_cumulative_flag(true), UsagePolicy::Cumulative);
}
