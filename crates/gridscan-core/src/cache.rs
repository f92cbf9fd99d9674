//! Generic TTL cache entries
//!
//! Every cache in the scanner (topology, per-node snapshots, scores) is a
//! value tagged with a capture time and a time-to-live. Freshness is a single
//! predicate so the TTL rule cannot drift between call sites.

/// A cached value with its capture timestamp and time-to-live
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    value: T,
    captured_at_ms: u64,
    ttl_ms: u64,
}

impl<T> CacheEntry<T> {
    /// Wrap a value captured at `now_ms` with the given TTL
    pub fn new(value: T, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            captured_at_ms: now_ms,
            ttl_ms,
        }
    }

    /// Fresh iff `now - captured_at < ttl`
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.captured_at_ms) < self.ttl_ms
    }

    /// Borrow the cached value regardless of freshness
    pub fn value(&self) -> &T {
        &self.value
    }

    /// When the value was captured
    pub fn captured_at_ms(&self) -> u64 {
        self.captured_at_ms
    }

    /// Consume the entry, returning the value
    pub fn into_value(self) -> T {
        self.value
    }
}
