//! Storage layer for prototype caches.
//!
//! The store owns every cached algorithm instance and exposes lookup by
//! canonical name. Orchestration (which family to consult, what to do on a
//! miss) lives in [`crate::engine`]; this layer only deals in ownership,
//! locking, and exact-name lookup.

pub mod metrics;
pub mod prototype;

pub use metrics::CacheMetrics;
pub use prototype::PrototypeCache;
