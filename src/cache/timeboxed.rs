//! In-memory response cache with a fixed freshness window
//!
//! Provides a `TimeBoxedCache` that remembers the last successful result for each
//! request key together with the time it was captured. Results younger than the
//! freshness window are served without calling the data source again; anything
//! older is treated as a miss and re-fetched through a caller-supplied function.

use chrono::{DateTime, Utc};
use lru::LruCache;
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;

use super::clock::{Clock, SystemClock};

/// Default freshness window: 10 minutes
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(600);

/// A cached value and when it was captured
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    /// The cached value
    value: V,
    /// When the value was fetched
    captured_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    /// An entry is fresh while its age is strictly below the window.
    /// Timestamps in the future (clock stepped back) count as age zero.
    fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match (now - self.captured_at).to_std() {
            Ok(age) => age < window,
            Err(_) => true,
        }
    }
}

/// Result of peeking into the cache, including metadata about freshness
#[derive(Debug)]
pub struct CachedData<'a, V> {
    /// The cached value
    pub data: &'a V,
    /// When the value was originally fetched
    pub captured_at: DateTime<Utc>,
    /// Whether the entry is past its freshness window
    pub is_expired: bool,
}

/// Construction-time settings for a `TimeBoxedCache`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a fetched value may be served from the cache
    ///
    /// Age is measured against the cache's clock. If that clock steps back
    /// behind an entry's capture time, the entry counts as age zero and stays
    /// fresh, for any window including zero, until the clock passes the
    /// capture time again. Capture times therefore never decrease. Call
    /// [`TimeBoxedCache::clear`] after a known clock correction to drop such
    /// entries.
    pub window: Duration,
    /// Maximum number of entries; `None` means unbounded.
    ///
    /// When set, the least recently used entry is evicted to make room. This
    /// goes beyond plain time-based expiry and is off by default.
    pub capacity: Option<NonZeroUsize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_FRESHNESS_WINDOW,
            capacity: None,
        }
    }
}

impl CacheConfig {
    /// Creates an unbounded config with the given freshness window
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            capacity: None,
        }
    }
}

/// Caches fetched values per key for a fixed freshness window
///
/// The cache is a plain owned value: construct it, hand it to whatever issues
/// requests, and drop it with its owner. All mutating operations take
/// `&mut self`, so a check-fetch-store sequence cannot interleave with another
/// one on the same cache.
///
/// Failed fetches are never cached. A failing call leaves any existing entry
/// untouched and returns the error to the caller; stale data is only reachable
/// through [`TimeBoxedCache::peek`].
pub struct TimeBoxedCache<V, C = SystemClock> {
    entries: LruCache<String, CacheEntry<V>>,
    window: Duration,
    clock: C,
}

impl<V, C> fmt::Debug for TimeBoxedCache<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeBoxedCache")
            .field("len", &self.entries.len())
            .field("window", &self.window)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<V, C> TimeBoxedCache<V, C> {
    /// Returns the freshness window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the capacity bound, if one was configured
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        let cap = self.entries.cap();
        (cap.get() != usize::MAX).then_some(cap)
    }

    /// Number of entries held, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> TimeBoxedCache<V, SystemClock> {
    /// Creates an unbounded cache on the wall clock
    pub fn new(window: Duration) -> Self {
        Self::with_config(CacheConfig::with_window(window))
    }

    /// Creates a cache on the wall clock from a full config
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V: Clone> Default for TimeBoxedCache<V, SystemClock> {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}

impl<V: Clone, C: Clock> TimeBoxedCache<V, C> {
    /// Creates a cache that reads time from `clock`
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        let entries = match config.capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            entries,
            window: config.window,
            clock,
        }
    }

    /// Returns the cached value for `key`, or fetches and caches a new one
    ///
    /// # Arguments
    /// * `key` - Cache key for the request (see [`super::cache_key`])
    /// * `fetch` - Performs the actual retrieval; called at most once, and only
    ///   when there is no fresh entry for `key`
    ///
    /// # Returns
    /// * `Ok(V)` - A copy of the fresh cached value, or the newly fetched value
    /// * `Err(E)` - The fetch error, unchanged; the cache is not modified
    pub fn get_or_fetch<F, E>(&mut self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.fresh_value(key) {
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        match fetch() {
            Ok(value) => Ok(self.store(key, value)),
            Err(err) => {
                debug!(key, "fetch failed, cache left unchanged");
                Err(err)
            }
        }
    }

    /// Async variant of [`TimeBoxedCache::get_or_fetch`]
    ///
    /// The cache stays mutably borrowed across the `.await`, so no other
    /// lookup on this cache can run while the fetch is in flight.
    pub async fn get_or_fetch_async<F, Fut, E>(&mut self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.fresh_value(key) {
            return Ok(value);
        }

        debug!(key, "cache miss, fetching");
        match fetch().await {
            Ok(value) => Ok(self.store(key, value)),
            Err(err) => {
                debug!(key, "fetch failed, cache left unchanged");
                Err(err)
            }
        }
    }

    /// Reads an entry without fetching and without changing eviction order
    ///
    /// Returns `Some(CachedData)` with `is_expired = true` for stale entries,
    /// allowing callers to fall back to old data when a fetch fails.
    pub fn peek(&self, key: &str) -> Option<CachedData<'_, V>> {
        let now = self.clock.now();
        self.entries.peek(key).map(|entry| CachedData {
            data: &entry.value,
            captured_at: entry.captured_at,
            is_expired: !entry.is_fresh(now, self.window),
        })
    }

    /// Whether `key` has an entry inside its freshness window
    pub fn contains_fresh(&self, key: &str) -> bool {
        self.peek(key).is_some_and(|cached| !cached.is_expired)
    }

    /// Removes the entry for `key`, if any
    ///
    /// Returns `true` if an entry was removed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.pop(key).is_some();
        if removed {
            debug!(key, "cache entry invalidated");
        }
        removed
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "cache cleared");
        self.entries.clear();
    }

    /// Returns a copy of the value for `key` if it is fresh.
    /// Only fresh hits are promoted in LRU order.
    fn fresh_value(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let fresh = self
            .entries
            .peek(key)
            .is_some_and(|entry| entry.is_fresh(now, self.window));
        if !fresh {
            return None;
        }

        let entry = self.entries.get(key)?;
        debug!(key, captured_at = %entry.captured_at, "cache hit");
        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, overwriting in place, and returns a copy.
    fn store(&mut self, key: &str, value: V) -> V {
        // Only reached when the existing entry (if any) is stale, and stale
        // implies captured_at <= now, so timestamps never move backwards.
        let captured_at = self.clock.now();

        let result = value.clone();
        let entry = CacheEntry { value, captured_at };
        if let Some((evicted, _)) = self.entries.push(key.to_string(), entry) {
            if evicted != key {
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }
        debug!(key, %captured_at, "cache entry stored");
        result
    }
}
