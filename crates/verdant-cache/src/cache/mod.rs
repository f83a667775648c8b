//! Bounded LRU cache of decoded thumbnails.
//!
//! The cache maps a [`PhotoId`] to a decoded bitmap and evicts the
//! least-recently-used entry once it exceeds its capacity. All operations
//! run inside one mutex-guarded critical section, so concurrent callers
//! never observe a state where the recency order and the store disagree or
//! where the store exceeds its capacity.
//!
//! Bitmaps are handed out as `Arc<DecodedImage>`: shared, immutable
//! handles. The cache owns the entry; callers must not mutate what they
//! are given back.

mod recency;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use verdant_core::DecodedImage;

use crate::PhotoId;
use recency::RecencyList;

/// Floor for the runtime-configurable capacity. A near-zero capacity would
/// evict on every insert, so misconfiguration clamps here instead.
pub const MIN_CAPACITY: usize = 20;

/// Capacity used by [`ThumbnailCache::default`].
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<PhotoId, Arc<DecodedImage>>,
    recency: RecencyList,
    capacity: usize,
}

impl CacheInner {
    /// Evict from the least-recent end until the store fits its capacity.
    fn evict_to_capacity(&mut self) {
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.recency.pop_oldest() else {
                break;
            };
            self.entries.remove(&oldest);
            debug!(photo_id = %oldest, "evicted least-recently-used thumbnail");
        }
    }
}

/// Concurrency-safe, capacity-bounded store of decoded thumbnails.
///
/// A miss is a normal outcome here, never an error; none of these
/// operations can fail.
#[derive(Debug)]
pub struct ThumbnailCache {
    inner: Mutex<CacheInner>,
}

impl ThumbnailCache {
    /// Create a cache holding at most `capacity` thumbnails.
    ///
    /// Capacities below [`MIN_CAPACITY`] are clamped up to it.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                recency: RecencyList::new(),
                capacity: capacity.max(MIN_CAPACITY),
            }),
        }
    }

    /// No cache operation may fail, so a poisoned lock is recovered rather
    /// than propagated; the inner state is consistent after every critical
    /// section.
    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a thumbnail, promoting it to most-recently-used on a hit.
    ///
    /// Returns `None` on a miss. Misses do not change the recency order.
    pub fn get(&self, id: PhotoId) -> Option<Arc<DecodedImage>> {
        let mut inner = self.lock();
        let hit = inner.entries.get(&id).cloned();
        if hit.is_some() {
            inner.recency.touch(id);
        }
        hit
    }

    /// Insert or replace the thumbnail for `id` and promote it to
    /// most-recently-used, evicting from the least-recent end if the store
    /// now exceeds its capacity.
    ///
    /// The cache takes ownership of the bitmap; callers keep no mutable
    /// alias.
    pub fn insert(&self, id: PhotoId, image: DecodedImage) {
        let mut inner = self.lock();
        inner.entries.insert(id, Arc::new(image));
        inner.recency.touch(id);
        inner.evict_to_capacity();
    }

    /// Change the capacity at runtime.
    ///
    /// Values below [`MIN_CAPACITY`] clamp silently. If the store is larger
    /// than the new capacity, least-recently-used entries are evicted until
    /// it fits.
    pub fn set_capacity(&self, capacity: usize) {
        let mut inner = self.lock();
        inner.capacity = capacity.max(MIN_CAPACITY);
        inner.evict_to_capacity();
    }

    /// Current capacity.
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Number of cached thumbnails.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache holds no thumbnails.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drop every cached thumbnail. Capacity is unchanged.
    pub fn clear(&self) {
        let mut inner = self.lock();
        let dropped = inner.entries.len();
        inner.entries.clear();
        inner.recency.clear();
        debug!(dropped, "cleared thumbnail cache");
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
