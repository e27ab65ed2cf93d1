//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::propagation::{DEFAULT_BAGGAGE_PREFIX, DEFAULT_PARENT_ID_HEADER, DEFAULT_TRACE_ID_HEADER};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct TracerConfig {
    /// Field names used on the wire.
    pub propagation: PropagationConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Settings of the echo server binary.
    pub server: ServerConfig,
}

/// Field names used to carry a trace between processes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PropagationConfig {
    /// Prefix prepended to every baggage key.
    pub baggage_prefix: String,

    /// Field holding the trace id.
    pub trace_id_header: String,

    /// Field holding the sender's span id.
    pub parent_id_header: String,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            baggage_prefix: DEFAULT_BAGGAGE_PREFIX.to_string(),
            trace_id_header: DEFAULT_TRACE_ID_HEADER.to_string(),
            parent_id_header: DEFAULT_PARENT_ID_HEADER.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record propagation counters.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

/// Echo server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Answer 400 when an inbound trace context is corrupt instead of
    /// starting a new trace.
    pub reject_corrupted: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            reject_corrupted: false,
        }
    }
}
