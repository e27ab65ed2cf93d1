//! Text map propagator.
//!
//! # Wire Format
//! ```text
//! <trace_id_key>:  decimal u64 trace id
//! <parent_id_key>: decimal u64 span id of the sender
//! <prefix><key>:   one field per baggage item, no escaping
//! ```
//!
//! # Design Decisions
//! - Identity field names match case-insensitively (header carriers lowercase them)
//! - The baggage prefix matches case-sensitively; baggage keys are carried verbatim
//! - An identity field name wins over the baggage prefix when both match
//! - A corrupt id aborts enumeration at that entry

use std::collections::HashMap;

use crate::propagation::carrier::{BoxError, Carrier};
use crate::propagation::error::{PropagationError, PropagationResult};
use crate::trace::context::{SpanContext, TraceContext};

/// Default prefix of baggage fields.
pub const DEFAULT_BAGGAGE_PREFIX: &str = "ot-baggage-";

/// Default name of the trace id field.
pub const DEFAULT_TRACE_ID_HEADER: &str = "x-datadog-trace-id";

/// Default name of the parent id field.
pub const DEFAULT_PARENT_ID_HEADER: &str = "x-datadog-parent-id";

/// Moves trace contexts in and out of carriers.
pub trait Propagator: Send + Sync {
    /// Write `context` into `carrier`.
    fn inject(&self, context: &dyn SpanContext, carrier: &mut dyn Carrier) -> PropagationResult<()>;

    /// Rebuild a trace context from `carrier`.
    fn extract(&self, carrier: &dyn Carrier) -> PropagationResult<TraceContext>;
}

/// Propagator writing ids as decimal strings and baggage as prefixed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMapPropagator {
    baggage_prefix: String,
    trace_id_key: String,
    parent_id_key: String,
}

impl TextMapPropagator {
    /// Create a propagator. An empty argument selects the default name for
    /// that field.
    pub fn new(
        baggage_prefix: impl Into<String>,
        trace_id_key: impl Into<String>,
        parent_id_key: impl Into<String>,
    ) -> Self {
        Self {
            baggage_prefix: or_default(baggage_prefix.into(), DEFAULT_BAGGAGE_PREFIX),
            trace_id_key: or_default(trace_id_key.into(), DEFAULT_TRACE_ID_HEADER),
            parent_id_key: or_default(parent_id_key.into(), DEFAULT_PARENT_ID_HEADER),
        }
    }

    pub fn baggage_prefix(&self) -> &str {
        &self.baggage_prefix
    }

    pub fn trace_id_key(&self) -> &str {
        &self.trace_id_key
    }

    pub fn parent_id_key(&self) -> &str {
        &self.parent_id_key
    }
}

impl Default for TextMapPropagator {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl Propagator for TextMapPropagator {
    fn inject(&self, context: &dyn SpanContext, carrier: &mut dyn Carrier) -> PropagationResult<()> {
        let ctx = context
            .as_trace_context()
            .ok_or(PropagationError::InvalidSpanContext)?;
        let writer = carrier.as_writer().ok_or(PropagationError::InvalidCarrier)?;

        writer.set(&self.trace_id_key, &ctx.trace_id().to_string());
        writer.set(&self.parent_id_key, &ctx.span_id().to_string());
        ctx.foreach_baggage_item(&mut |key, value| {
            writer.set(&format!("{}{}", self.baggage_prefix, key), value);
            true
        });
        Ok(())
    }

    fn extract(&self, carrier: &dyn Carrier) -> PropagationResult<TraceContext> {
        let reader = carrier.as_reader().ok_or(PropagationError::InvalidCarrier)?;

        let mut trace_id = 0;
        let mut parent_id = 0;
        let mut baggage = HashMap::new();

        reader
            .foreach_key(&mut |key, value| {
                if key.eq_ignore_ascii_case(&self.trace_id_key) {
                    trace_id = parse_id(value)?;
                } else if key.eq_ignore_ascii_case(&self.parent_id_key) {
                    parent_id = parse_id(value)?;
                } else if let Some(item) = key.strip_prefix(self.baggage_prefix.as_str()) {
                    baggage.insert(item.to_string(), value.to_string());
                }
                Ok(())
            })
            .map_err(PropagationError::from_visit)?;

        if trace_id == 0 && parent_id == 0 {
            return Err(PropagationError::SpanContextNotFound);
        }
        Ok(TraceContext::with_baggage(trace_id, parent_id, baggage))
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Parse an unsigned base-10 id. Signs, whitespace and overflow are corrupt.
fn parse_id(value: &str) -> Result<u64, BoxError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PropagationError::SpanContextCorrupted.into());
    }
    value
        .parse()
        .map_err(|_| Box::new(PropagationError::SpanContextCorrupted) as BoxError)
}
