//! Spans as seen by the propagation layer.
//!
//! Timing, finishing and export belong to the surrounding tracer; a span here
//! only carries its name, its parent id and its [`TraceContext`].

use crate::trace::context::TraceContext;

/// A unit of work in a trace.
#[derive(Debug, Clone)]
pub struct Span {
    name: String,
    parent_id: u64,
    context: TraceContext,
}

impl Span {
    pub(crate) fn new(name: impl Into<String>, parent_id: u64, context: TraceContext) -> Self {
        Self {
            name: name.into(),
            parent_id,
            context,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Span id of the parent, zero for a root span.
    pub fn parent_id(&self) -> u64 {
        self.parent_id
    }

    pub fn trace_id(&self) -> u64 {
        self.context.trace_id()
    }

    pub fn span_id(&self) -> u64 {
        self.context.span_id()
    }

    /// The context to hand to `inject` or to child spans.
    pub fn context(&self) -> &TraceContext {
        &self.context
    }

    /// Attach a baggage item to this span's trace context.
    pub fn set_baggage_item(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.context.set_baggage_item(key, value);
        self
    }

    pub fn baggage_item(&self, key: &str) -> Option<String> {
        self.context.baggage_item(key)
    }
}
