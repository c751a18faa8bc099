//! Error types for the protocache library.
//!
//! The error surface is deliberately narrow: a missing algorithm is a normal
//! `None` result, never an error, and lifecycle misuse (looking up before
//! `Engine::initialize`) is a contract violation that panics. The only error
//! type here backs the `check_invariants` methods used by tests and debugging.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal cache invariants are violated
//!   (`check_invariants` methods).

use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods such as
/// [`PrototypeCache::check_invariants`](crate::store::prototype::PrototypeCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
