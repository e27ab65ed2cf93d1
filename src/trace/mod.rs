//! Trace contexts, spans and the tracer facade.
//!
//! # Data Flow
//! ```text
//! Tracer::start_span / start_child_span
//!     → id.rs (fresh span id, fresh trace id for roots)
//!     → context.rs (TraceContext with shared baggage)
//!     → span.rs (Span handed to application code)
//!
//! Tracer::inject / extract
//!     → delegated unchanged to the configured Propagator
//! ```

pub mod context;
pub mod id;
pub mod span;
pub mod tracer;

pub use context::{ContextSnapshot, NoopSpanContext, SpanContext, TraceContext};
pub use span::Span;
pub use tracer::Tracer;
