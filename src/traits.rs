//! Algorithm family traits and the search seam.
//!
//! The cache layer is generic over four structurally identical but
//! type-distinct algorithm families. Each family is an object-safe trait
//! extending [`Algorithm`], which supplies the self-reported canonical name
//! used as the default cache key. Concrete cipher and hash implementations
//! live outside this crate; the traits here carry only the surface the cache
//! and its callers need.
//!
//! [`AlgorithmSource`] is the construction-on-miss seam: when a prototype
//! lookup misses, the engine delegates to a source implementation that may
//! consult the opaque factory context, apply provider preference ordering,
//! and build a fresh instance. Sources that serve only some families can rely
//! on the default method bodies, which report every algorithm as unavailable.

use crate::name::NameRequest;

/// Common surface of every cached algorithm instance.
///
/// `Send + Sync` is required because prototypes are shared across threads by
/// the cache layer.
pub trait Algorithm: Send + Sync {
    /// The self-reported canonical name of this configuration
    /// (e.g. `"AES-128"`, `"HMAC(SHA-256)"`).
    ///
    /// This becomes the cache key when an instance is registered without an
    /// explicit alias.
    fn name(&self) -> String;
}

/// Block cipher family.
pub trait BlockCipher: Algorithm {
    /// Block size in bytes.
    fn block_size(&self) -> usize;
}

/// Stream cipher family.
pub trait StreamCipher: Algorithm {}

/// Hash function family.
pub trait HashFunction: Algorithm {
    /// Digest length in bytes.
    fn output_length(&self) -> usize;
}

/// Message authentication code family.
pub trait MessageAuthCode: Algorithm {
    /// Tag length in bytes.
    fn output_length(&self) -> usize;
}

/// Family-specific search operations invoked on a cache miss.
///
/// An implementation owns the actual lookup strategy (linear scan, provider
/// registry, platform preference ordering) and constructs a new instance when
/// one is available. Returning `None` means "no implementation available
/// right now" and is not cached, so a later request retries the search.
///
/// `Context` is the opaque factory context threaded through unmodified from
/// the caller; the engine never inspects it.
///
/// Ownership of a returned `Box` transfers to the engine immediately; the
/// source must not retain references to what it returns.
pub trait AlgorithmSource: Send + Sync {
    /// Opaque factory context passed through to every search operation.
    type Context;

    /// Searches for a block cipher matching `request`.
    fn find_block_cipher(
        &self,
        _request: &NameRequest,
        _context: &Self::Context,
    ) -> Option<Box<dyn BlockCipher>> {
        None
    }

    /// Searches for a stream cipher matching `request`.
    fn find_stream_cipher(
        &self,
        _request: &NameRequest,
        _context: &Self::Context,
    ) -> Option<Box<dyn StreamCipher>> {
        None
    }

    /// Searches for a hash function matching `request`.
    fn find_hash(
        &self,
        _request: &NameRequest,
        _context: &Self::Context,
    ) -> Option<Box<dyn HashFunction>> {
        None
    }

    /// Searches for a message authentication code matching `request`.
    fn find_mac(
        &self,
        _request: &NameRequest,
        _context: &Self::Context,
    ) -> Option<Box<dyn MessageAuthCode>> {
        None
    }
}
