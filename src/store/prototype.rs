//! Thread-safe owning store for constructed algorithm prototypes.
//!
//! ## Architecture
//!
//! - One `PrototypeCache` per algorithm family, each with its own independent
//!   `parking_lot::RwLock`, so lookups in different families never contend.
//! - Entries live in an `FxHashMap<String, Arc<A>>` keyed by canonical name.
//! - The cache is the owner of record for every stored instance. Callers
//!   receive `Arc` clones, so a prototype can never dangle: overwriting an
//!   entry releases the cache's reference and the instance is destroyed
//!   exactly once, when the last outstanding clone drops.
//!
//! ## Core Operations
//!
//! - [`get`](PrototypeCache::get): exact-name lookup, `Arc` clone on hit.
//! - [`add`](PrototypeCache::add): insert under an alias or the instance's
//!   self-reported name; replaces (and releases) any previous holder.
//! - `contains` / `len` / `clear` / `metrics`: auxiliary surface.
//!
//! ## Concurrency
//!
//! `get` takes the read lock, `add` the write lock; both release before
//! returning, and no user code runs while a lock is held, so critical
//! sections are bounded by map operations only. There is no capacity bound
//! and no eviction: an entry lives until overwritten or until the cache is
//! dropped.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::InvariantError;
use crate::store::metrics::{CacheCounters, CacheMetrics};
use crate::traits::Algorithm;

/// Thread-safe map from canonical algorithm name to a shared prototype
/// instance of one family.
///
/// `A` is typically a family trait object such as `dyn HashFunction`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use protocache::store::prototype::PrototypeCache;
/// use protocache::traits::{Algorithm, HashFunction};
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
/// let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();
/// cache.add(Some(Arc::new(Sha256)), None);
///
/// let hit = cache.get("SHA-256").expect("registered above");
/// assert_eq!(hit.output_length(), 32);
/// assert!(cache.get("SHA-512").is_none());
/// ```
pub struct PrototypeCache<A: ?Sized> {
    map: RwLock<FxHashMap<String, Arc<A>>>,
    metrics: CacheCounters,
}

impl<A> Default for PrototypeCache<A>
where
    A: Algorithm + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PrototypeCache<A>
where
    A: Algorithm + ?Sized,
{
    /// Creates an empty cache with its own freshly constructed lock.
    pub fn new() -> Self {
        Self {
            map: RwLock::new(FxHashMap::default()),
            metrics: CacheCounters::default(),
        }
    }

    /// Looks up a prototype by exact canonical name.
    ///
    /// Returns a shared handle to the stored instance, or `None` on a miss.
    /// A miss is a normal result, not an error. Never inserts, never blocks
    /// beyond read-lock acquisition.
    pub fn get(&self, name: &str) -> Option<Arc<A>> {
        match self.map.read().get(name).cloned() {
            Some(algo) => {
                self.metrics.inc_hit();
                Some(algo)
            },
            None => {
                self.metrics.inc_miss();
                None
            },
        }
    }

    /// Registers a prototype, taking ownership.
    ///
    /// A `None` instance is a no-op, so callers may pass a possibly-failed
    /// search result straight through. The key is `index_name` when provided
    /// and non-empty, otherwise the instance's self-reported
    /// [`name`](Algorithm::name); an explicit alias makes an instance
    /// reachable under a name distinct from its own. If an entry already
    /// exists under the key, the cache's reference to the old instance is
    /// released before the new one is stored.
    pub fn add(&self, algo: Option<Arc<A>>, index_name: Option<&str>) {
        let Some(algo) = algo else {
            return;
        };

        let key = match index_name {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => algo.name(),
        };

        let previous = self.map.write().insert(key, algo);
        if previous.is_some() {
            self.metrics.inc_overwrite();
        } else {
            self.metrics.inc_insert();
        }
    }

    /// Returns `true` if a prototype is registered under `name`.
    ///
    /// Does not update hit/miss metrics.
    pub fn contains(&self, name: &str) -> bool {
        self.map.read().contains_key(name)
    }

    /// Returns the number of registered prototypes.
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Returns `true` if no prototypes are registered.
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Releases every stored prototype.
    ///
    /// Instances with outstanding caller handles are destroyed when the last
    /// handle drops.
    pub fn clear(&self) {
        self.map.write().clear();
    }

    /// Returns a snapshot of the cache's activity counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics.snapshot()
    }

    /// Verifies internal invariants, returning a description of the first
    /// violation found.
    ///
    /// Every key must be a non-empty string: `add` derives the key from a
    /// non-empty alias or the instance's own name, so an empty key means a
    /// registration path was bypassed.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let map = self.map.read();
        if map.keys().any(|key| key.is_empty()) {
            return Err(InvariantError::new("prototype stored under empty name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use proptest::prelude::*;

    use super::*;
    use crate::traits::HashFunction;

    /// Hash stub whose destruction is observable through a shared counter.
    struct CountedHash {
        name: String,
        drops: Arc<AtomicUsize>,
    }

    impl CountedHash {
        fn new(name: &str, drops: &Arc<AtomicUsize>) -> Arc<dyn HashFunction> {
            Arc::new(Self {
                name: name.to_string(),
                drops: Arc::clone(drops),
            })
        }
    }

    impl Drop for CountedHash {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Algorithm for CountedHash {
        fn name(&self) -> String {
            self.name.clone()
        }
    }

    impl HashFunction for CountedHash {
        fn output_length(&self) -> usize {
            32
        }
    }

    #[test]
    fn get_returns_identity_equal_instance_until_overwritten() {
        let drops = Arc::new(AtomicUsize::new(0));
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();

        let original = CountedHash::new("SHA-256", &drops);
        cache.add(Some(Arc::clone(&original)), None);

        let hit = cache.get("SHA-256").unwrap();
        assert!(Arc::ptr_eq(&hit, &original));

        let replacement = CountedHash::new("SHA-256", &drops);
        cache.add(Some(Arc::clone(&replacement)), None);
        let hit = cache.get("SHA-256").unwrap();
        assert!(Arc::ptr_eq(&hit, &replacement));
        assert!(!Arc::ptr_eq(&hit, &original));
    }

    #[test]
    fn overwrite_destroys_previous_instance_exactly_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();

        cache.add(Some(CountedHash::new("SHA-256", &drops)), None);
        assert_eq!(drops.load(Ordering::SeqCst), 0);

        cache.add(Some(CountedHash::new("SHA-256", &drops)), None);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);

        let metrics = cache.metrics();
        assert_eq!(metrics.inserts, 1);
        assert_eq!(metrics.overwrites, 1);
    }

    #[test]
    fn teardown_destroys_all_instances() {
        let drops = Arc::new(AtomicUsize::new(0));
        {
            let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();
            cache.add(Some(CountedHash::new("SHA-256", &drops)), None);
            cache.add(Some(CountedHash::new("SHA-512", &drops)), None);
        }
        assert_eq!(drops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn absent_instance_is_a_no_op() {
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();
        cache.add(None, None);
        cache.add(None, Some("SHA-256"));
        assert!(cache.is_empty());
        assert_eq!(cache.metrics(), CacheMetrics::default());
    }

    #[test]
    fn alias_does_not_register_self_reported_name() {
        let drops = Arc::new(AtomicUsize::new(0));
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();

        cache.add(Some(CountedHash::new("SHA-256", &drops)), Some("SHA-2(256)"));
        assert!(cache.get("SHA-2(256)").is_some());
        assert!(cache.get("SHA-256").is_none());
    }

    #[test]
    fn empty_alias_falls_back_to_self_reported_name() {
        let drops = Arc::new(AtomicUsize::new(0));
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();

        cache.add(Some(CountedHash::new("SHA-256", &drops)), Some(""));
        assert!(cache.get("SHA-256").is_some());
        cache.check_invariants().unwrap();
    }

    #[test]
    fn clear_releases_every_entry() {
        let drops = Arc::new(AtomicUsize::new(0));
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();
        cache.add(Some(CountedHash::new("SHA-256", &drops)), None);
        cache.add(Some(CountedHash::new("SHA-512", &drops)), None);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(drops.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn metrics_track_hits_and_misses() {
        let drops = Arc::new(AtomicUsize::new(0));
        let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();
        cache.add(Some(CountedHash::new("SHA-256", &drops)), None);

        cache.get("SHA-256");
        cache.get("SHA-256");
        cache.get("MD5");

        let metrics = cache.metrics();
        assert_eq!(metrics.hits, 2);
        assert_eq!(metrics.misses, 1);
    }

    // ------------------------------------------------------------------
    // Model-based property tests
    // ------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Add { name: String, alias: Option<String> },
        Get(String),
    }

    fn small_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("AES-128".to_string()),
            Just("SHA-256".to_string()),
            Just("HMAC(SHA-256)".to_string()),
            Just("Serpent".to_string()),
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (
                small_name(),
                proptest::option::of(prop_oneof![small_name(), Just(String::new())]),
            )
                .prop_map(|(name, alias)| Op::Add { name, alias }),
            small_name().prop_map(Op::Get),
        ]
    }

    proptest! {
        // The cache must behave like a plain name -> name map where the key
        // is the alias when present and non-empty, else the instance name.
        #[test]
        fn add_get_matches_model(ops in proptest::collection::vec(op_strategy(), 1..64)) {
            let drops = Arc::new(AtomicUsize::new(0));
            let cache: PrototypeCache<dyn HashFunction> = PrototypeCache::new();
            let mut model: HashMap<String, String> = HashMap::new();

            for op in ops {
                match op {
                    Op::Add { name, alias } => {
                        let key = match alias.as_deref() {
                            Some(a) if !a.is_empty() => a.to_string(),
                            _ => name.clone(),
                        };
                        model.insert(key, name.clone());
                        cache.add(Some(CountedHash::new(&name, &drops)), alias.as_deref());
                    },
                    Op::Get(name) => {
                        prop_assert_eq!(
                            cache.get(&name).map(|algo| algo.name()),
                            model.get(&name).cloned()
                        );
                    },
                }
            }

            prop_assert_eq!(cache.len(), model.len());
            prop_assert!(cache.check_invariants().is_ok());
        }
    }
}
