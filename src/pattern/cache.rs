use hashbrown::HashMap as FastHashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{CompileOptions, CompiledPattern, PatternResult, compile_pattern};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternCacheKey {
    template: String,
    options: CompileOptions,
}

impl PatternCacheKey {
    pub fn new(template: &str, options: CompileOptions) -> Self {
        Self {
            template: template.to_string(),
            options,
        }
    }
}

#[derive(Debug)]
struct CacheState {
    map: FastHashMap<PatternCacheKey, Arc<CompiledPattern>>,
    order: VecDeque<PatternCacheKey>,
}

/// Memoizes compiled templates so repeated renders reuse the same matcher.
#[derive(Debug)]
pub struct PatternCache {
    capacity: usize,
    state: Mutex<CacheState>,
    stats: CacheStats,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PatternCache {
    pub fn new(capacity: usize) -> Self {
        let cap = capacity.max(1);
        Self {
            capacity: cap,
            state: Mutex::new(CacheState {
                map: FastHashMap::with_capacity(cap),
                order: VecDeque::with_capacity(cap),
            }),
            stats: CacheStats::default(),
        }
    }

    /// Returns the cached pattern for `(template, options)`, compiling it on a miss.
    pub fn get_or_compile(
        &self,
        template: &str,
        options: CompileOptions,
    ) -> PatternResult<Arc<CompiledPattern>> {
        let key = PatternCacheKey::new(template, options);

        {
            let mut state = self.state.lock();
            if let Some(found) = state.map.get(&key).cloned() {
                promote(&mut state.order, &key);
                self.stats.record_hit();
                return Ok(found);
            }
        }

        self.stats.record_miss();
        tracing::trace!(template, exact = options.exact, "compiling route template");
        let compiled = Arc::new(compile_pattern(template, options)?);

        let mut state = self.state.lock();
        if let Some(raced) = state.map.get(&key).cloned() {
            promote(&mut state.order, &key);
            return Ok(raced);
        }

        if state.order.len() == self.capacity
            && let Some(oldest) = state.order.pop_back()
        {
            state.map.remove(&oldest);
        }

        state.order.push_front(key.clone());
        state.map.insert(key, compiled.clone());
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.state.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.map.clear();
        state.order.clear();
    }

    /// `(hits, misses)` since creation.
    pub fn metrics(&self) -> (u64, u64) {
        self.stats.snapshot()
    }
}

fn promote(order: &mut VecDeque<PatternCacheKey>, key: &PatternCacheKey) {
    if let Some(pos) = order.iter().position(|existing| existing == key) {
        order.remove(pos);
    }
    order.push_front(key.clone());
}

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_returns_same_instance() {
        let cache = PatternCache::new(4);
        let first = cache.get_or_compile("/a/:b", CompileOptions::default()).unwrap();
        let second = cache.get_or_compile("/a/:b", CompileOptions::default()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.metrics(), (1, 1));
    }

    #[test]
    fn exactness_is_part_of_the_key() {
        let cache = PatternCache::new(4);
        let prefix = cache.get_or_compile("/a", CompileOptions::default()).unwrap();
        let exact = cache
            .get_or_compile(
                "/a",
                CompileOptions {
                    exact: true,
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!Arc::ptr_eq(&prefix, &exact));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = PatternCache::new(2);
        let options = CompileOptions::default();
        let first = cache.get_or_compile("/first", options).unwrap();
        cache.get_or_compile("/second", options).unwrap();
        cache.get_or_compile("/first", options).unwrap();
        cache.get_or_compile("/third", options).unwrap();

        assert_eq!(cache.len(), 2);
        let again = cache.get_or_compile("/first", options).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(cache.metrics(), (2, 3));
    }

    #[test]
    fn compile_errors_are_not_cached() {
        let cache = PatternCache::new(2);
        assert!(cache.get_or_compile("/:", CompileOptions::default()).is_err());
        assert!(cache.is_empty());
    }
}
