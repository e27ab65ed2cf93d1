//! End-to-end propagation tests across carriers and threads.

use std::collections::HashMap;
use std::thread;

use axum::http::{HeaderMap, HeaderValue};
use trace_propagation::propagation::{
    HttpHeadersCarrier, PropagationError, Propagator, TextMapCarrier, TextMapPropagator,
    DEFAULT_PARENT_ID_HEADER, DEFAULT_TRACE_ID_HEADER,
};
use trace_propagation::{NoopSpanContext, TraceContext, Tracer};

#[test]
fn test_header_example() {
    let tracer = Tracer::with_propagator(TextMapPropagator::new("bg-", "tid", "pid"));
    let ctx = TraceContext::new(123456789, 987654321);
    ctx.set_baggage_item("item", "x");

    let mut headers = HeaderMap::new();
    tracer
        .inject(&ctx, &mut HttpHeadersCarrier(&mut headers))
        .unwrap();

    assert_eq!(headers.len(), 3);
    assert_eq!(headers.get("tid").unwrap(), "123456789");
    assert_eq!(headers.get("pid").unwrap(), "987654321");
    assert_eq!(headers.get("bg-item").unwrap(), "x");
}

#[test]
fn test_started_span_round_trips_through_headers() {
    let tracer = Tracer::with_propagator(TextMapPropagator::new("bg-", "tid", "pid"));
    let root = tracer.start_span("web.request");
    root.set_baggage_item("item", "x");

    let mut headers = HeaderMap::new();
    tracer
        .inject(root.context(), &mut HttpHeadersCarrier(&mut headers))
        .unwrap();
    assert_eq!(headers.get("tid").unwrap(), root.trace_id().to_string().as_str());
    assert_eq!(headers.get("pid").unwrap(), root.span_id().to_string().as_str());

    let extracted = tracer.extract(&HttpHeadersCarrier(&headers)).unwrap();
    assert_eq!(extracted.trace_id(), root.trace_id());
    assert_eq!(extracted.span_id(), root.span_id());
    assert_eq!(extracted.baggage_items(), root.context().baggage_items());

    // The receiving side continues the same trace.
    let child = tracer.start_child_span("rpc.handle", &extracted);
    assert_eq!(child.trace_id(), root.trace_id());
    assert_eq!(child.parent_id(), root.span_id());
    assert_eq!(child.baggage_item("item").as_deref(), Some("x"));
}

#[test]
fn test_round_trip_through_text_map() {
    let propagator = TextMapPropagator::default();
    let ctx = TraceContext::new(u64::MAX, 1);
    ctx.set_baggage_item("user", "alice");
    ctx.set_baggage_item("Mixed-Case", "kept verbatim");
    ctx.set_baggage_item("empty", "");

    let mut map: HashMap<String, String> = HashMap::new();
    propagator
        .inject(&ctx, &mut TextMapCarrier(&mut map))
        .unwrap();
    let extracted = propagator.extract(&TextMapCarrier(&map)).unwrap();

    assert_eq!(extracted.trace_id(), u64::MAX);
    assert_eq!(extracted.span_id(), 1);
    assert_eq!(extracted.baggage_items(), ctx.baggage_items());
}

#[test]
fn test_extract_from_canonical_case_headers() {
    let mut map: HashMap<String, String> = HashMap::new();
    map.insert("X-Datadog-Trace-Id".to_string(), "10".to_string());
    map.insert("X-Datadog-Parent-Id".to_string(), "20".to_string());

    let extracted = TextMapPropagator::default()
        .extract(&TextMapCarrier(&map))
        .unwrap();
    assert_eq!(extracted.trace_id(), 10);
    assert_eq!(extracted.span_id(), 20);
}

#[test]
fn test_error_taxonomy() {
    let propagator = TextMapPropagator::new("", "", "");

    let mut headers = HeaderMap::new();
    let err = propagator
        .inject(&NoopSpanContext, &mut HttpHeadersCarrier(&mut headers))
        .unwrap_err();
    assert!(matches!(err, PropagationError::InvalidSpanContext));

    let err = propagator
        .inject(&TraceContext::new(1, 2), &mut HttpHeadersCarrier(&headers))
        .unwrap_err();
    assert!(matches!(err, PropagationError::InvalidCarrier));
    assert!(headers.is_empty());

    for (trace, parent) in [("1", "A"), ("A", "2")] {
        let mut map: HashMap<String, String> = HashMap::new();
        map.insert(DEFAULT_TRACE_ID_HEADER.to_string(), trace.to_string());
        map.insert(DEFAULT_PARENT_ID_HEADER.to_string(), parent.to_string());
        let err = propagator.extract(&TextMapCarrier(&map)).unwrap_err();
        assert!(matches!(err, PropagationError::SpanContextCorrupted));
    }

    let mut headers = HeaderMap::new();
    headers.insert(DEFAULT_TRACE_ID_HEADER, HeaderValue::from_bytes(b"1\xff").unwrap());
    headers.insert(DEFAULT_PARENT_ID_HEADER, HeaderValue::from_static("2"));
    let err = propagator.extract(&HttpHeadersCarrier(&headers)).unwrap_err();
    assert!(matches!(err, PropagationError::SpanContextCorrupted));

    let mut map: HashMap<String, String> = HashMap::new();
    map.insert(DEFAULT_TRACE_ID_HEADER.to_string(), "0".to_string());
    map.insert(DEFAULT_PARENT_ID_HEADER.to_string(), "0".to_string());
    let err = propagator.extract(&TextMapCarrier(&map)).unwrap_err();
    assert!(matches!(err, PropagationError::SpanContextNotFound));
}

#[test]
fn test_concurrent_inject_while_setting_baggage() {
    let tracer = Tracer::with_propagator(TextMapPropagator::new("bg-", "tid", "pid"));
    let span = tracer.start_span("fan.out");

    thread::scope(|s| {
        for writer in 0..4 {
            let ctx = span.context().clone();
            s.spawn(move || {
                for i in 0..200 {
                    ctx.set_baggage_item(format!("w{writer}-{i}"), format!("{i}"));
                }
            });
        }
        for _ in 0..4 {
            let ctx = span.context().clone();
            let tracer = tracer.clone();
            s.spawn(move || {
                for _ in 0..50 {
                    let mut map: HashMap<String, String> = HashMap::new();
                    tracer.inject(&ctx, &mut TextMapCarrier(&mut map)).unwrap();
                    // Every injected item is whole: its value matches its key suffix.
                    for (key, value) in &map {
                        if let Some(item) = key.strip_prefix("bg-") {
                            let (_, i) = item.split_once('-').unwrap();
                            assert_eq!(i, value.as_str());
                        }
                    }
                }
            });
        }
    });

    assert_eq!(span.context().baggage_len(), 800);

    let mut map: HashMap<String, String> = HashMap::new();
    tracer
        .inject(span.context(), &mut TextMapCarrier(&mut map))
        .unwrap();
    assert_eq!(map.len(), 802);
}
