//! protocache: thread-safe prototype caching for cryptographic algorithm
//! factories.
//!
//! Callers request an algorithm by canonical name; the [`engine::Engine`]
//! either returns the previously constructed prototype for that name or runs
//! a one-time external search and memoizes the result. Four independent
//! caches cover the four algorithm families (block cipher, stream cipher,
//! hash function, MAC) through one generic [`store::PrototypeCache`].

pub mod engine;
pub mod error;
pub mod name;
pub mod prelude;
pub mod store;
pub mod traits;
