//! Canonical algorithm name requests.
//!
//! A [`NameRequest`] wraps the canonical string rendering of an algorithm
//! specification (e.g. `"AES-128"` or `"HMAC(SHA-256)"`) produced by an
//! external name parser. The rendering is the cache key: two requests that
//! render identically denote the same algorithm, and two different renderings
//! are assumed to denote different algorithms. Parsing a raw specification
//! string into canonical form is out of scope for this crate.

use std::fmt;

/// A request for an algorithm by canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameRequest {
    canonical: String,
}

impl NameRequest {
    /// Creates a request from an already-canonical name rendering.
    ///
    /// # Example
    ///
    /// ```
    /// use protocache::name::NameRequest;
    ///
    /// let request = NameRequest::new("AES-128");
    /// assert_eq!(request.as_str(), "AES-128");
    /// ```
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
        }
    }

    /// Returns the canonical rendering used as the cache key.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for NameRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl From<&str> for NameRequest {
    fn from(canonical: &str) -> Self {
        Self::new(canonical)
    }
}

impl From<String> for NameRequest {
    fn from(canonical: String) -> Self {
        Self::new(canonical)
    }
}
