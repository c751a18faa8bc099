//! Lookup-or-search-and-memoize orchestration over the four family caches.
//!
//! An [`Engine`] pairs an [`AlgorithmSource`] (the construction-on-miss
//! strategy) with one [`PrototypeCache`] per algorithm family. A prototype
//! lookup consults the family cache first; only on a miss does it run the
//! source's search, and a successful search result is memoized under the
//! request's canonical name before being returned. A failed search is not
//! memoized, so a later request retries it (a provider may have become
//! available in the meantime).
//!
//! ## Lifecycle
//!
//! `Engine::new` produces an inert engine with no caches. [`initialize`]
//! (exactly once) allocates all four caches, each with its own independent
//! lock; only then may lookups and registrations run. Using an inert engine,
//! or initializing twice, is a programming error and panics. Dropping the
//! engine releases all four caches and every prototype they own, in any
//! state.
//!
//! ## Concurrency
//!
//! The search runs outside any cache lock, so two threads missing on the same
//! name may both construct an instance. The cache's `add` resolves the race
//! last-write-wins: the losing instance is released once its caller's handle
//! drops, never leaked and never double-owned. Each caller's returned handle
//! stays valid regardless of who won.
//!
//! [`initialize`]: Engine::initialize

use std::sync::Arc;

use crate::name::NameRequest;
use crate::store::metrics::CacheMetrics;
use crate::store::prototype::PrototypeCache;
use crate::traits::{
    Algorithm, AlgorithmSource, BlockCipher, HashFunction, MessageAuthCode, StreamCipher,
};

/// One prototype cache per algorithm family, allocated together so callers
/// never observe a partially initialized engine.
struct FamilyCaches {
    block_cipher: PrototypeCache<dyn BlockCipher>,
    stream_cipher: PrototypeCache<dyn StreamCipher>,
    hash: PrototypeCache<dyn HashFunction>,
    mac: PrototypeCache<dyn MessageAuthCode>,
}

impl FamilyCaches {
    fn new() -> Self {
        Self {
            block_cipher: PrototypeCache::new(),
            stream_cipher: PrototypeCache::new(),
            hash: PrototypeCache::new(),
            mac: PrototypeCache::new(),
        }
    }
}

/// Engine lifecycle state. There is no transition back from `Ready`.
enum EngineState {
    Inert,
    Ready(FamilyCaches),
}

/// Per-family metrics snapshot for an initialized engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    pub block_cipher: CacheMetrics,
    pub stream_cipher: CacheMetrics,
    pub hash: CacheMetrics,
    pub mac: CacheMetrics,
}

/// Memoizing front for a cryptographic algorithm factory.
///
/// `S` supplies the family-specific search operations; the opaque
/// `S::Context` is threaded through to every search unmodified.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use protocache::engine::Engine;
/// use protocache::name::NameRequest;
/// use protocache::traits::{Algorithm, AlgorithmSource, HashFunction};
///
/// struct Sha256;
///
/// impl Algorithm for Sha256 {
///     fn name(&self) -> String {
///         "SHA-256".to_string()
///     }
/// }
///
/// impl HashFunction for Sha256 {
///     fn output_length(&self) -> usize {
///         32
///     }
/// }
///
/// struct BuiltinSource;
///
/// impl AlgorithmSource for BuiltinSource {
///     type Context = ();
///
///     fn find_hash(&self, request: &NameRequest, _: &()) -> Option<Box<dyn HashFunction>> {
///         (request.as_str() == "SHA-256").then(|| Box::new(Sha256) as Box<dyn HashFunction>)
///     }
/// }
///
/// let mut engine = Engine::new(BuiltinSource);
/// engine.initialize();
///
/// let request = NameRequest::new("SHA-256");
/// let first = engine.prototype_hash(&request, &()).expect("source knows SHA-256");
/// let second = engine.prototype_hash(&request, &()).expect("memoized");
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct Engine<S: AlgorithmSource> {
    source: S,
    state: EngineState,
}

impl<S: AlgorithmSource> Engine<S> {
    /// Creates an inert engine with no caches.
    ///
    /// [`initialize`](Engine::initialize) must be called before any lookup or
    /// registration.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: EngineState::Inert,
        }
    }

    /// Allocates all four family caches, each with its own independent lock.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn initialize(&mut self) {
        if matches!(self.state, EngineState::Ready(_)) {
            panic!("Engine::initialize called on an already-initialized engine");
        }
        self.state = EngineState::Ready(FamilyCaches::new());
    }

    /// Returns `true` once [`initialize`](Engine::initialize) has run.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    fn caches(&self) -> &FamilyCaches {
        match &self.state {
            EngineState::Ready(caches) => caches,
            EngineState::Inert => {
                panic!("engine used before Engine::initialize")
            },
        }
    }

    /// Acquires a block cipher prototype, searching and memoizing on a miss.
    pub fn prototype_block_cipher(
        &self,
        request: &NameRequest,
        context: &S::Context,
    ) -> Option<Arc<dyn BlockCipher>> {
        lookup_or_search(&self.caches().block_cipher, request, || {
            self.source.find_block_cipher(request, context)
        })
    }

    /// Acquires a stream cipher prototype, searching and memoizing on a miss.
    pub fn prototype_stream_cipher(
        &self,
        request: &NameRequest,
        context: &S::Context,
    ) -> Option<Arc<dyn StreamCipher>> {
        lookup_or_search(&self.caches().stream_cipher, request, || {
            self.source.find_stream_cipher(request, context)
        })
    }

    /// Acquires a hash function prototype, searching and memoizing on a miss.
    pub fn prototype_hash(
        &self,
        request: &NameRequest,
        context: &S::Context,
    ) -> Option<Arc<dyn HashFunction>> {
        lookup_or_search(&self.caches().hash, request, || {
            self.source.find_hash(request, context)
        })
    }

    /// Acquires a message authentication code prototype, searching and
    /// memoizing on a miss.
    pub fn prototype_mac(
        &self,
        request: &NameRequest,
        context: &S::Context,
    ) -> Option<Arc<dyn MessageAuthCode>> {
        lookup_or_search(&self.caches().mac, request, || {
            self.source.find_mac(request, context)
        })
    }

    /// Registers a hand-picked block cipher under its self-reported name,
    /// bypassing the search path.
    pub fn add_block_cipher(&self, algo: Box<dyn BlockCipher>) {
        self.caches().block_cipher.add(Some(Arc::from(algo)), None);
    }

    /// Registers a hand-picked stream cipher under its self-reported name.
    pub fn add_stream_cipher(&self, algo: Box<dyn StreamCipher>) {
        self.caches().stream_cipher.add(Some(Arc::from(algo)), None);
    }

    /// Registers a hand-picked hash function under its self-reported name.
    pub fn add_hash(&self, algo: Box<dyn HashFunction>) {
        self.caches().hash.add(Some(Arc::from(algo)), None);
    }

    /// Registers a hand-picked message authentication code under its
    /// self-reported name.
    pub fn add_mac(&self, algo: Box<dyn MessageAuthCode>) {
        self.caches().mac.add(Some(Arc::from(algo)), None);
    }

    /// Returns per-family metrics snapshots.
    pub fn metrics(&self) -> EngineMetrics {
        let caches = self.caches();
        EngineMetrics {
            block_cipher: caches.block_cipher.metrics(),
            stream_cipher: caches.stream_cipher.metrics(),
            hash: caches.hash.metrics(),
            mac: caches.mac.metrics(),
        }
    }
}

/// The shared lookup-or-search-and-memoize protocol.
///
/// The fast path returns straight from the cache without invoking `search`.
/// On a miss, `search` runs with no cache lock held; a `Some` result is
/// memoized under the request's canonical name and returned, a `None` result
/// is returned uncached so a later call retries.
fn lookup_or_search<A>(
    cache: &PrototypeCache<A>,
    request: &NameRequest,
    search: impl FnOnce() -> Option<Box<A>>,
) -> Option<Arc<A>>
where
    A: Algorithm + ?Sized,
{
    if let Some(algo) = cache.get(request.as_str()) {
        return Some(algo);
    }

    let found: Option<Arc<A>> = search().map(Arc::from);
    cache.add(found.clone(), Some(request.as_str()));
    found
}
