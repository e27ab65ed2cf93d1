//! Propagation metrics.
//!
//! # Metrics
//! - `propagation_inject_total` (counter): inject calls by outcome
//! - `propagation_extract_total` (counter): extract calls by outcome
//!
//! Outcome is `ok` or [`PropagationError::label`].

use crate::propagation::PropagationError;

fn outcome<T>(result: &Result<T, PropagationError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(err) => err.label(),
    }
}

/// Count one inject call.
pub fn record_inject(result: &Result<(), PropagationError>) {
    metrics::counter!("propagation_inject_total", "outcome" => outcome(result)).increment(1);
}

/// Count one extract call.
pub fn record_extract<T>(result: &Result<T, PropagationError>) {
    metrics::counter!("propagation_extract_total", "outcome" => outcome(result)).increment(1);
}
