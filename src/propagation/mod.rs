//! Trace-context propagation subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound:
//!     Tracer::inject
//!     → propagator.rs (type checks, encode ids + baggage)
//!     → carrier.rs (one set() per field)
//!
//! Inbound:
//!     carrier.rs (foreach_key over every entry)
//!     → propagator.rs (classify each entry, parse ids, collect baggage)
//!     → TraceContext, or a PropagationError
//! ```
//!
//! # Design Decisions
//! - Carriers are call-scoped; nothing here keeps a reference after returning
//! - Every failure is returned to the caller, nothing is logged or retried here
//! - "Not found" and "corrupted" stay distinct error variants

pub mod carrier;
pub mod error;
pub mod propagator;

pub use carrier::{BoxError, Carrier, HttpHeadersCarrier, TextMapCarrier, TextMapReader, TextMapWriter};
pub use error::{PropagationError, PropagationResult};
pub use propagator::{
    Propagator, TextMapPropagator, DEFAULT_BAGGAGE_PREFIX, DEFAULT_PARENT_ID_HEADER,
    DEFAULT_TRACE_ID_HEADER,
};
