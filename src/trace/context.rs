//! Trace context: identity pair plus shared baggage.
//!
//! # Design Decisions
//! - Ids are immutable once the context exists; zero means "not set"
//! - Baggage lives behind an `Arc<DashMap>` so every clone of a context sees
//!   the same items and concurrent writers of distinct keys never lose updates
//! - Child contexts get a copy of the parent's baggage, not a shared handle

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

/// Boundary trait for anything handed to inject as "a span context".
///
/// Only [`TraceContext`] answers `as_trace_context` with `Some`; placeholder
/// contexts use the default and are rejected by the propagator.
pub trait SpanContext: Send + Sync {
    /// Visit every baggage item until `visit` returns false.
    fn foreach_baggage_item(&self, visit: &mut dyn FnMut(&str, &str) -> bool);

    fn as_trace_context(&self) -> Option<&TraceContext> {
        None
    }
}

/// Context handed out when tracing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpanContext;

impl SpanContext for NoopSpanContext {
    fn foreach_baggage_item(&self, _visit: &mut dyn FnMut(&str, &str) -> bool) {}
}

/// Identity of the current propagation point plus its baggage.
#[derive(Debug, Clone)]
pub struct TraceContext {
    trace_id: u64,
    span_id: u64,
    baggage: Arc<DashMap<String, String>>,
}

impl TraceContext {
    /// Create a context with empty baggage.
    pub fn new(trace_id: u64, span_id: u64) -> Self {
        Self {
            trace_id,
            span_id,
            baggage: Arc::new(DashMap::new()),
        }
    }

    /// Create a context seeded with `baggage`.
    pub fn with_baggage(trace_id: u64, span_id: u64, baggage: HashMap<String, String>) -> Self {
        Self {
            trace_id,
            span_id,
            baggage: Arc::new(baggage.into_iter().collect()),
        }
    }

    /// Derive the context of a child span: same trace, new span id,
    /// baggage copied at this instant.
    pub fn child(&self, span_id: u64) -> Self {
        Self::with_baggage(self.trace_id, span_id, self.baggage_items())
    }

    pub fn trace_id(&self) -> u64 {
        self.trace_id
    }

    pub fn span_id(&self) -> u64 {
        self.span_id
    }

    /// Attach a baggage item, visible to every holder of this context.
    pub fn set_baggage_item(&self, key: impl Into<String>, value: impl Into<String>) {
        self.baggage.insert(key.into(), value.into());
    }

    /// Look up a baggage item.
    pub fn baggage_item(&self, key: &str) -> Option<String> {
        self.baggage.get(key).map(|r| r.value().clone())
    }

    /// Point-in-time copy of the baggage.
    pub fn baggage_items(&self) -> HashMap<String, String> {
        self.baggage
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    pub fn baggage_len(&self) -> usize {
        self.baggage.len()
    }

    /// Serializable view, baggage sorted by key.
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            trace_id: self.trace_id,
            span_id: self.span_id,
            baggage: self.baggage_items().into_iter().collect(),
        }
    }
}

impl SpanContext for TraceContext {
    fn foreach_baggage_item(&self, visit: &mut dyn FnMut(&str, &str) -> bool) {
        // Iterate a copy so no shard lock is held while `visit` runs.
        for (key, value) in self.baggage_items() {
            if !visit(&key, &value) {
                break;
            }
        }
    }

    fn as_trace_context(&self) -> Option<&TraceContext> {
        Some(self)
    }
}

/// Plain-data view of a [`TraceContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSnapshot {
    pub trace_id: u64,
    pub span_id: u64,
    pub baggage: BTreeMap<String, String>,
}
