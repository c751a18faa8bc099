//! Lock-free counters for prototype cache activity.
//!
//! Counters use `AtomicU64` with relaxed ordering so the hot lookup path never
//! takes an extra lock. Snapshots may be slightly stale under concurrency but
//! are eventually consistent.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a prototype cache's activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Successful lookups.
    pub hits: u64,
    /// Failed lookups.
    pub misses: u64,
    /// Insertions under a previously unused name.
    pub inserts: u64,
    /// Insertions that replaced (and released) an existing instance.
    pub overwrites: u64,
}

/// Internal atomic counters backing [`CacheMetrics`].
#[derive(Debug, Default)]
pub(crate) struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    overwrites: AtomicU64,
}

impl CacheCounters {
    pub(crate) fn snapshot(&self) -> CacheMetrics {
        CacheMetrics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn inc_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_overwrite(&self) {
        self.overwrites.fetch_add(1, Ordering::Relaxed);
    }
}
