//! Substitution map cache.
//!
//! Caches one [`SubstitutionMap`] per context type so repeated resolutions
//! against the same context walk the inheritance chain once.
//!
//! Each key owns a `OnceLock` cell. The map lock is only held to find or
//! insert the cell; the computation itself runs outside it, and concurrent
//! requests for the same key wait on the cell instead of computing twice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use genus_core::{TypeNode, TypeResolutionError};

use crate::substitution::SubstitutionMap;

type CachedMap = Result<Arc<SubstitutionMap>, TypeResolutionError>;
type Cell = Arc<OnceLock<CachedMap>>;

/// Thread-safe compute-once cache of substitution maps.
///
/// Entries are never evicted: the cache holds one map for every distinct
/// context it has seen (each parameterization counts separately) until
/// [`clear`](Self::clear) is called. Owners fed unbounded input should clear
/// it periodically.
#[derive(Debug, Default)]
pub struct SubstitutionCache {
    entries: RwLock<FxHashMap<TypeNode, Cell>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl SubstitutionCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a completed entry.
    pub fn get(&self, context: &TypeNode) -> Option<CachedMap> {
        self.entries
            .read()
            .get(context)
            .and_then(|cell| cell.get().cloned())
    }

    /// Return the cached result for `context`, computing it at most once.
    pub fn get_or_compute<F>(&self, context: &TypeNode, compute: F) -> CachedMap
    where
        F: FnOnce() -> Result<SubstitutionMap, TypeResolutionError>,
    {
        let existing = self.entries.read().get(context).cloned();
        let cell = match existing {
            Some(cell) => cell,
            None => self
                .entries
                .write()
                .entry(context.clone())
                .or_default()
                .clone(),
        };

        let mut computed = false;
        let result = cell
            .get_or_init(|| {
                computed = true;
                compute().map(Arc::new)
            })
            .clone();

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    /// Number of cached contexts.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that ran the computation.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn context() -> TypeNode {
        TypeNode::parameterized("java.util.List", vec![TypeNode::raw("java.lang.String")])
    }

    #[test]
    fn cache_new_is_empty() {
        let cache = SubstitutionCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(&context()).is_none());
    }

    #[test]
    fn computes_once() {
        let cache = SubstitutionCache::new();
        let mut calls = 0;
        let first = cache
            .get_or_compute(&context(), || {
                calls += 1;
                Ok(SubstitutionMap::new())
            })
            .unwrap();
        let second = cache
            .get_or_compute(&context(), || unreachable!("already cached"))
            .unwrap();
        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn errors_are_cached() {
        let cache = SubstitutionCache::new();
        let err = TypeResolutionError::RecursionLimit {
            limit: 1,
            class: "demo.Deep".into(),
        };
        let result = cache.get_or_compute(&context(), || Err(err.clone()));
        assert_eq!(result.unwrap_err(), err);
        assert_eq!(cache.get(&context()).map(|r| r.is_err()), Some(true));
    }

    #[test]
    fn clear_resets() {
        let cache = SubstitutionCache::new();
        cache
            .get_or_compute(&context(), || Ok(SubstitutionMap::new()))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn one_entry_per_distinct_context() {
        let cache = SubstitutionCache::new();
        let empty = || Ok(SubstitutionMap::new());
        for arg in ["java.lang.String", "java.lang.Integer", "java.lang.Long"] {
            let list = TypeNode::parameterized("java.util.List", vec![TypeNode::raw(arg)]);
            cache.get_or_compute(&list, empty).unwrap();
            cache.get_or_compute(&list, empty).unwrap();
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.hits(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_requests_share_one_computation() {
        let cache = Arc::new(SubstitutionCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache
                        .get_or_compute(&context(), || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(SubstitutionMap::new())
                        })
                        .unwrap()
                })
            })
            .collect();
        let maps: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(maps.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
