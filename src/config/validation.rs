//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Field names must be usable as HTTP header names
//! - Identity field names must not collide with each other or with baggage fields
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TracerConfig → Result<(), Vec<ValidationError>>
//! - Empty field names are accepted; collision checks run on the names the
//!   propagator resolves them to, so a default can still collide

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::TracerConfig;
use crate::propagation::TextMapPropagator;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} {value:?} is not a valid header name")]
    InvalidHeaderName { field: &'static str, value: String },

    #[error("trace id and parent id headers are both {0:?}")]
    DuplicateIdentityHeader(String),

    #[error("baggage prefix {prefix:?} also matches identity header {header:?}")]
    PrefixShadowsIdentity { prefix: String, header: String },

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),

    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &TracerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let propagation = &config.propagation;

    for (field, value) in [
        ("baggage_prefix", &propagation.baggage_prefix),
        ("trace_id_header", &propagation.trace_id_header),
        ("parent_id_header", &propagation.parent_id_header),
    ] {
        if !value.is_empty() && HeaderName::from_bytes(value.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName {
                field,
                value: value.clone(),
            });
        }
    }

    let effective = TextMapPropagator::new(
        propagation.baggage_prefix.clone(),
        propagation.trace_id_header.clone(),
        propagation.parent_id_header.clone(),
    );
    let trace = effective.trace_id_key();
    let parent = effective.parent_id_key();
    if trace.eq_ignore_ascii_case(parent) {
        errors.push(ValidationError::DuplicateIdentityHeader(trace.to_string()));
    }

    let prefix = effective.baggage_prefix().to_ascii_lowercase();
    for header in [trace, parent] {
        if header.to_ascii_lowercase().starts_with(&prefix) {
            errors.push(ValidationError::PrefixShadowsIdentity {
                prefix: effective.baggage_prefix().to_string(),
                header: header.to_string(),
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.server.bind_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
