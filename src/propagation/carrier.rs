//! Carrier adapters.
//!
//! # Responsibilities
//! - Define the `set` / `foreach_key` capabilities a propagator writes to and reads from
//! - Adapt `http::HeaderMap` (case-insensitive, multi-valued)
//! - Adapt `HashMap<String, String>` (case-sensitive, verbatim)
//!
//! # Design Decisions
//! - Wrappers borrow or own the underlying collection; no copying or format conversion
//! - A shared borrow only yields a reader, so inject into it fails with `InvalidCarrier`
//! - `foreach_key` stops at the first visitor error and returns it unchanged
//! - Header values that are not UTF-8 are visited with invalid bytes replaced
//!   by U+FFFD and a warning is logged; such an id never parses

use std::borrow::{Borrow, BorrowMut, Cow};
use std::collections::HashMap;

use axum::http::header::{HeaderMap, HeaderName, HeaderValue};

/// Boxed error flowing out of a `foreach_key` visitor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Write capability of a carrier.
pub trait TextMapWriter {
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// Read capability of a carrier.
pub trait TextMapReader {
    /// Call `visit` once per entry. Enumeration stops at the first error,
    /// which is returned as is.
    fn foreach_key(
        &self,
        visit: &mut dyn FnMut(&str, &str) -> Result<(), BoxError>,
    ) -> Result<(), BoxError>;
}

/// Boundary trait accepted by the propagator.
///
/// Each carrier reports which capabilities it has. The defaults report none.
pub trait Carrier {
    fn as_writer(&mut self) -> Option<&mut dyn TextMapWriter> {
        None
    }

    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        None
    }
}

/// Carrier over HTTP headers.
///
/// Wrap `&mut HeaderMap` (or an owned map) to inject, `&HeaderMap` to extract.
#[derive(Debug, Clone, Default)]
pub struct HttpHeadersCarrier<H>(pub H);

impl<H: Borrow<HeaderMap>> HttpHeadersCarrier<H> {
    /// Access the wrapped headers.
    pub fn headers(&self) -> &HeaderMap {
        self.0.borrow()
    }
}

impl<H: BorrowMut<HeaderMap>> TextMapWriter for HttpHeadersCarrier<H> {
    fn set(&mut self, key: &str, value: &str) {
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(_) => {
                tracing::warn!(header = %key, "Dropping field with invalid header name");
                return;
            }
        };
        let value = match HeaderValue::from_bytes(value.as_bytes()) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(header = %key, "Dropping field with invalid header value");
                return;
            }
        };
        self.0.borrow_mut().insert(name, value);
    }
}

impl<H: Borrow<HeaderMap>> TextMapReader for HttpHeadersCarrier<H> {
    fn foreach_key(
        &self,
        visit: &mut dyn FnMut(&str, &str) -> Result<(), BoxError>,
    ) -> Result<(), BoxError> {
        let headers = self.0.borrow();
        for name in headers.keys() {
            // First value only.
            if let Some(value) = headers.get(name) {
                let value = String::from_utf8_lossy(value.as_bytes());
                if matches!(value, Cow::Owned(_)) {
                    tracing::warn!(header = %name, "Header value is not UTF-8, invalid bytes replaced");
                }
                visit(name.as_str(), &*value)?;
            }
        }
        Ok(())
    }
}

impl Carrier for HttpHeadersCarrier<HeaderMap> {
    fn as_writer(&mut self) -> Option<&mut dyn TextMapWriter> {
        Some(self)
    }

    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        Some(self)
    }
}

impl Carrier for HttpHeadersCarrier<&mut HeaderMap> {
    fn as_writer(&mut self) -> Option<&mut dyn TextMapWriter> {
        Some(self)
    }

    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        Some(self)
    }
}

impl Carrier for HttpHeadersCarrier<&HeaderMap> {
    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        Some(self)
    }
}

/// Carrier over a plain string map. Keys are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct TextMapCarrier<M>(pub M);

impl<M: Borrow<HashMap<String, String>>> TextMapCarrier<M> {
    /// Access the wrapped map.
    pub fn map(&self) -> &HashMap<String, String> {
        self.0.borrow()
    }
}

impl<M: BorrowMut<HashMap<String, String>>> TextMapWriter for TextMapCarrier<M> {
    fn set(&mut self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl<M: Borrow<HashMap<String, String>>> TextMapReader for TextMapCarrier<M> {
    fn foreach_key(
        &self,
        visit: &mut dyn FnMut(&str, &str) -> Result<(), BoxError>,
    ) -> Result<(), BoxError> {
        for (key, value) in self.0.borrow() {
            visit(key, value)?;
        }
        Ok(())
    }
}

impl Carrier for TextMapCarrier<HashMap<String, String>> {
    fn as_writer(&mut self) -> Option<&mut dyn TextMapWriter> {
        Some(self)
    }

    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        Some(self)
    }
}

impl Carrier for TextMapCarrier<&mut HashMap<String, String>> {
    fn as_writer(&mut self) -> Option<&mut dyn TextMapWriter> {
        Some(self)
    }

    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        Some(self)
    }
}

impl Carrier for TextMapCarrier<&HashMap<String, String>> {
    fn as_reader(&self) -> Option<&dyn TextMapReader> {
        Some(self)
    }
}
