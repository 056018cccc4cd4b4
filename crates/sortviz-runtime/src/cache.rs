#![forbid(unsafe_code)]

//! Shared trace cache keyed by (algorithm, input).
//!
//! Traces are generated at most once per key and handed out as `Arc<Trace>`.
//! Failed generations are never cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use ahash::AHashMap;
use sortviz_core::{Algorithm, Trace, TraceError};

type CacheKey = (Algorithm, Vec<i64>);

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
pub struct TraceCache {
    entries: Mutex<AHashMap<CacheKey, Arc<Trace>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TraceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached trace for the key, generating it on first use.
    pub fn get_or_generate(
        &self,
        algorithm: Algorithm,
        input: &[i64],
    ) -> Result<Arc<Trace>, TraceError> {
        let key = (algorithm, input.to_vec());
        if let Some(trace) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                message = "cache.hit",
                algorithm = algorithm.key(),
                len = input.len()
            );
            return Ok(Arc::clone(trace));
        }

        // Generate outside the lock; a concurrent miss on the same key keeps
        // whichever trace was inserted first.
        let trace = Arc::new(sortviz_core::generate(algorithm, input)?);
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            message = "cache.miss",
            algorithm = algorithm.key(),
            len = input.len(),
            steps = trace.len()
        );
        let mut entries = self.lock();
        Ok(Arc::clone(entries.entry(key).or_insert(trace)))
    }

    #[must_use]
    pub fn contains(&self, algorithm: Algorithm, input: &[i64]) -> bool {
        self.lock().contains_key(&(algorithm, input.to_vec()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<CacheKey, Arc<Trace>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_is_a_hit_sharing_the_trace() {
        let cache = TraceCache::new();
        let a = cache.get_or_generate(Algorithm::Bubble, &[3, 1, 2]).unwrap();
        let b = cache.get_or_generate(Algorithm::Bubble, &[3, 1, 2]).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn keys_distinguish_algorithm_and_input() {
        let cache = TraceCache::new();
        cache.get_or_generate(Algorithm::Bubble, &[3, 1]).unwrap();
        cache.get_or_generate(Algorithm::Merge, &[3, 1]).unwrap();
        cache.get_or_generate(Algorithm::Merge, &[1, 3]).unwrap();
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(Algorithm::Merge, &[1, 3]));
        assert!(!cache.contains(Algorithm::Heap, &[1, 3]));
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = TraceCache::new();
        assert!(cache.get_or_generate(Algorithm::Radix, &[-1, 2]).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn clear_empties() {
        let cache = TraceCache::new();
        cache.get_or_generate(Algorithm::Quick, &[2, 1]).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
