//! Cache module for reusing recent API responses
//!
//! This module provides an in-memory cache keyed by normalized request keys.
//! Entries are served while they are inside a fixed freshness window; older
//! entries are re-fetched through a caller-supplied function. Failed fetches
//! are never cached, and nothing is persisted across restarts.

mod clock;
mod key;
mod timeboxed;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{cache_key, normalize_subject, RequestKind};
pub use timeboxed::{CacheConfig, CachedData, TimeBoxedCache, DEFAULT_FRESHNESS_WINDOW};
