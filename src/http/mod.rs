//! HTTP wiring subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → middleware/propagation.rs (extract, start span, attach to extensions)
//!     → server.rs handler (reads RequestSpan)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{PropagationState, RequestSpan};
pub use server::EchoServer;
