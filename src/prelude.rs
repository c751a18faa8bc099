//! Convenience re-exports for common usage.

pub use crate::engine::{Engine, EngineMetrics};
pub use crate::error::InvariantError;
pub use crate::name::NameRequest;
pub use crate::store::metrics::CacheMetrics;
pub use crate::store::prototype::PrototypeCache;
pub use crate::traits::{
    Algorithm, AlgorithmSource, BlockCipher, HashFunction, MessageAuthCode, StreamCipher,
};
