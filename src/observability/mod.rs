//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP middleware, CLI:
//!     → logging.rs (structured log events)
//!     → metrics.rs (inject/extract outcome counters)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → whatever `metrics` recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The propagation core emits nothing; callers decide what an outcome is worth
//! - Metrics are cheap (counter increments, no-op without a recorder)

pub mod logging;
pub mod metrics;
