//! Propagation error taxonomy.

use thiserror::Error;

use crate::propagation::carrier::BoxError;

/// Errors returned by [`Propagator::inject`] and [`Propagator::extract`].
///
/// [`Propagator::inject`]: crate::propagation::Propagator::inject
/// [`Propagator::extract`]: crate::propagation::Propagator::extract
#[derive(Debug, Error)]
pub enum PropagationError {
    /// The carrier lacks the capability the operation needs
    /// (`set` for inject, `foreach_key` for extract).
    #[error("invalid carrier")]
    InvalidCarrier,

    /// The context handed to inject is not a real trace context.
    #[error("invalid span context")]
    InvalidSpanContext,

    /// A trace-id or parent-id field is present but is not a decimal u64.
    #[error("span context corrupted")]
    SpanContextCorrupted,

    /// Neither a trace id nor a parent id was found.
    #[error("span context not found")]
    SpanContextNotFound,

    /// The carrier failed while enumerating its own entries.
    #[error("carrier enumeration failed: {0}")]
    Carrier(#[source] BoxError),
}

impl PropagationError {
    /// Recover the error a visitor returned through `foreach_key`.
    ///
    /// Errors raised by the propagator's own visitor come back as
    /// themselves; anything else came from the carrier.
    pub(crate) fn from_visit(err: BoxError) -> Self {
        match err.downcast::<PropagationError>() {
            Ok(err) => *err,
            Err(other) => PropagationError::Carrier(other),
        }
    }

    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            PropagationError::InvalidCarrier => "invalid_carrier",
            PropagationError::InvalidSpanContext => "invalid_span_context",
            PropagationError::SpanContextCorrupted => "corrupted",
            PropagationError::SpanContextNotFound => "not_found",
            PropagationError::Carrier(_) => "carrier_error",
        }
    }
}

/// Result type for propagation operations.
pub type PropagationResult<T> = Result<T, PropagationError>;
