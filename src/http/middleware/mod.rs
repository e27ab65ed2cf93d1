//! Request middleware.

pub mod propagation;

pub use propagation::{propagation_middleware, PropagationState, RequestSpan};
