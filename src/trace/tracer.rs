//! Tracer facade.
//!
//! # Responsibilities
//! - Hold the configured propagator and forward inject/extract to it unchanged
//! - Start root and child spans with fresh ids
//!
//! # Design Decisions
//! - The propagator sits behind `Arc<dyn Propagator>` so a tracer is cheap to clone
//!   and can be shared across threads and request handlers

use std::sync::Arc;

use crate::config::schema::PropagationConfig;
use crate::propagation::{Carrier, PropagationResult, Propagator, TextMapPropagator};
use crate::trace::context::{SpanContext, TraceContext};
use crate::trace::id::generate_id;
use crate::trace::span::Span;

/// Entry point for application code.
#[derive(Clone)]
pub struct Tracer {
    propagator: Arc<dyn Propagator>,
}

impl Tracer {
    /// Tracer using the default text map propagator.
    pub fn new() -> Self {
        Self::with_propagator(TextMapPropagator::default())
    }

    /// Tracer using a custom propagator.
    pub fn with_propagator(propagator: impl Propagator + 'static) -> Self {
        Self {
            propagator: Arc::new(propagator),
        }
    }

    /// Tracer using the field names from configuration.
    pub fn from_config(config: &PropagationConfig) -> Self {
        Self::with_propagator(TextMapPropagator::new(
            config.baggage_prefix.clone(),
            config.trace_id_header.clone(),
            config.parent_id_header.clone(),
        ))
    }

    /// Start the root span of a new trace.
    pub fn start_span(&self, name: impl Into<String>) -> Span {
        let id = generate_id();
        Span::new(name, 0, TraceContext::new(id, id))
    }

    /// Start a span whose parent is `parent`, local or extracted.
    pub fn start_child_span(&self, name: impl Into<String>, parent: &TraceContext) -> Span {
        Span::new(name, parent.span_id(), parent.child(generate_id()))
    }

    /// Write `context` into `carrier` with the configured propagator.
    pub fn inject(&self, context: &dyn SpanContext, carrier: &mut dyn Carrier) -> PropagationResult<()> {
        self.propagator.inject(context, carrier)
    }

    /// Read a trace context from `carrier` with the configured propagator.
    pub fn extract(&self, carrier: &dyn Carrier) -> PropagationResult<TraceContext> {
        self.propagator.extract(carrier)
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}
