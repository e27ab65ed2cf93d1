//! Echo server.
//!
//! # Responsibilities
//! - Create Axum Router with the propagation middleware
//! - Answer every request with the span it was assigned, as JSON
//! - Inject that span into the response headers so callers can chain the trace
//! - Serve until Ctrl-C

use axum::{
    extract::Extension,
    http::HeaderMap,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::TracerConfig;
use crate::http::middleware::{propagation_middleware, PropagationState, RequestSpan};
use crate::observability::metrics;
use crate::propagation::HttpHeadersCarrier;
use crate::trace::{ContextSnapshot, Tracer};

/// Body returned by the echo handler.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub span: String,
    pub parent_id: u64,
    pub context: ContextSnapshot,
}

/// HTTP server echoing trace contexts.
pub struct EchoServer {
    router: Router,
    config: TracerConfig,
}

impl EchoServer {
    /// Create a new server with the given configuration.
    pub fn new(config: TracerConfig) -> Self {
        let tracer = Tracer::from_config(&config.propagation);
        let state = PropagationState {
            tracer,
            reject_corrupted: config.server.reject_corrupted,
            metrics_enabled: config.observability.metrics_enabled,
        };
        let router = Self::build_router(state);
        Self { router, config }
    }

    fn build_router(state: PropagationState) -> Router {
        Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .layer(Extension(state.clone()))
            .layer(middleware::from_fn_with_state(state, propagation_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for embedding or for driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The configuration the server was built from.
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Echo server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Echo server stopped");
        Ok(())
    }
}

async fn echo_handler(
    Extension(state): Extension<PropagationState>,
    Extension(RequestSpan(span)): Extension<RequestSpan>,
) -> Response {
    let mut headers = HeaderMap::new();
    let injected = state
        .tracer
        .inject(span.context(), &mut HttpHeadersCarrier(&mut headers));
    if state.metrics_enabled {
        metrics::record_inject(&injected);
    }
    if let Err(err) = injected {
        tracing::error!(error = %err, "Failed to inject response trace context");
    }

    let body = EchoResponse {
        span: span.name().to_string(),
        parent_id: span.parent_id(),
        context: span.context().snapshot(),
    };
    (headers, Json(body)).into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
