//! Trace propagation middleware.
//! Continues the caller's trace, or starts a new one, for every request.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::observability::metrics;
use crate::propagation::{HttpHeadersCarrier, PropagationError};
use crate::trace::{Span, Tracer};

/// State required for propagation.
#[derive(Clone, Debug)]
pub struct PropagationState {
    pub tracer: Tracer,
    pub reject_corrupted: bool,
    pub metrics_enabled: bool,
}

/// Span attached to every request that passed the middleware.
#[derive(Clone, Debug)]
pub struct RequestSpan(pub Span);

pub async fn propagation_middleware(
    State(state): State<PropagationState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let extracted = state.tracer.extract(&HttpHeadersCarrier(req.headers()));
    if state.metrics_enabled {
        metrics::record_extract(&extracted);
    }

    let span = match extracted {
        Ok(parent) => {
            tracing::debug!(
                trace_id = parent.trace_id(),
                parent_id = parent.span_id(),
                baggage_items = parent.baggage_len(),
                "Continuing inbound trace"
            );
            state.tracer.start_child_span("http.request", &parent)
        }
        Err(PropagationError::SpanContextNotFound) => {
            tracing::debug!("No inbound trace context, starting a new trace");
            state.tracer.start_span("http.request")
        }
        Err(err) => {
            tracing::warn!(error = %err, kind = err.label(), "Corrupt inbound trace context");
            if state.reject_corrupted {
                return (StatusCode::BAD_REQUEST, "Corrupt trace context").into_response();
            }
            state.tracer.start_span("http.request")
        }
    };

    req.extensions_mut().insert(RequestSpan(span));
    next.run(req).await
}
