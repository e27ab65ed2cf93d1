//! Trace-context propagation for distributed tracing clients.
//!
//! Serializes a trace's identity and baggage into transport-neutral key/value
//! carriers (HTTP headers, string maps) and rebuilds it on the receiving side.

pub mod config;
pub mod http;
pub mod observability;
pub mod propagation;
pub mod trace;

pub use config::schema::TracerConfig;
pub use propagation::{
    Carrier, HttpHeadersCarrier, PropagationError, Propagator, TextMapCarrier, TextMapPropagator,
};
pub use trace::{NoopSpanContext, Span, SpanContext, TraceContext, Tracer};
