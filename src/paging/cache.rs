//! Page Cache
//!
//! Raw pages keyed by `(resource, resource id, page number, page size)`.
//! The accumulator never talks to the cache directly; `CachedFetcher` sits
//! in front of the real fetcher, and the mutation bridge invalidates by prefix
//! through it before resetting.
//!
//! Every invalidation bumps a per-prefix generation. A fetch that started
//! before the bump may still complete, but its page is not stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ahash::RandomState;
use hashlink::LruCache;

use super::fetcher::PageFetcher;
use super::page::{KeyPrefix, PageKey, PageRequest, PageResult};
use crate::error::Result;

/// Storage for raw pages
pub trait PageCache<T>: Send + Sync {
    /// Look up a cached page
    fn get(&self, key: &PageKey) -> Option<PageResult<T>>;

    /// Store a page, replacing any previous value
    fn set(&self, key: PageKey, value: PageResult<T>);

    /// Drop every page under `prefix`, returning how many were removed
    fn invalidate(&self, prefix: &KeyPrefix) -> usize;

    /// Number of invalidations seen for `prefix`
    fn generation(&self, prefix: &KeyPrefix) -> u64;

    /// Store a page only if `prefix` was not invalidated since `generation`
    fn set_if_current(&self, key: PageKey, value: PageResult<T>, generation: u64) -> bool;
}

struct Pages<T> {
    lru: LruCache<PageKey, PageResult<T>, RandomState>,
    generations: HashMap<KeyPrefix, u64, RandomState>,
}

impl<T> Pages<T> {
    fn generation(&self, prefix: &KeyPrefix) -> u64 {
        self.generations.get(prefix).copied().unwrap_or(0)
    }
}

/// Bounded least-recently-used page cache
pub struct LruPageCache<T> {
    pages: Mutex<Pages<T>>,
    capacity: usize,
}

impl<T> LruPageCache<T> {
    /// Create a cache holding at most `capacity` pages
    pub fn new(capacity: usize) -> Self {
        Self {
            pages: Mutex::new(Pages {
                lru: LruCache::with_hasher(capacity, RandomState::new()),
                generations: HashMap::with_hasher(RandomState::new()),
            }),
            capacity,
        }
    }

    /// Maximum number of pages kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pages currently cached
    pub fn len(&self) -> usize {
        self.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Pages<T>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone + Send> PageCache<T> for LruPageCache<T> {
    fn get(&self, key: &PageKey) -> Option<PageResult<T>> {
        self.lock().lru.get(key).cloned()
    }

    fn set(&self, key: PageKey, value: PageResult<T>) {
        if self.capacity == 0 {
            return;
        }
        self.lock().lru.insert(key, value);
    }

    fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        let mut pages = self.lock();
        *pages.generations.entry(prefix.clone()).or_insert(0) += 1;
        let stale: Vec<PageKey> = pages
            .lru
            .iter()
            .filter(|(key, _)| key.matches(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            pages.lru.remove(key);
        }
        if !stale.is_empty() {
            tracing::debug!(
                "Invalidated {} cached page(s) for {}/{}",
                stale.len(),
                prefix.kind,
                prefix.resource_id
            );
        }
        stale.len()
    }

    fn generation(&self, prefix: &KeyPrefix) -> u64 {
        self.lock().generation(prefix)
    }

    fn set_if_current(&self, key: PageKey, value: PageResult<T>, generation: u64) -> bool {
        let mut pages = self.lock();
        if pages.generation(&key.prefix) != generation {
            return false;
        }
        if self.capacity > 0 {
            pages.lru.insert(key, value);
        }
        true
    }
}

impl<T> std::fmt::Debug for LruPageCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruPageCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

/// Fetcher that serves pages from a cache and fills it on miss
pub struct CachedFetcher<F, C> {
    inner: F,
    cache: Arc<C>,
}

impl<F, C> CachedFetcher<F, C> {
    pub fn new(inner: F, cache: Arc<C>) -> Self {
        Self { inner, cache }
    }

    /// Shared handle to the cache, for prefix invalidation
    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<T, F, C> PageFetcher<T> for CachedFetcher<F, C>
where
    T: Clone + Send,
    F: PageFetcher<T>,
    C: PageCache<T>,
{
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = Result<PageResult<T>>> + Send {
        async move {
            let key = request.key();
            if let Some(hit) = self.cache.get(&key) {
                tracing::debug!(
                    "Cache hit for {}/{} page {}",
                    request.kind,
                    request.resource_id,
                    request.page_number
                );
                return Ok(hit);
            }

            let generation = self.cache.generation(&key.prefix);
            let page = self.inner.fetch(request).await?;
            if !self.cache.set_if_current(key, page.clone(), generation) {
                tracing::debug!(
                    "Not caching {}/{} page {}: invalidated while in flight",
                    request.kind,
                    request.resource_id,
                    request.page_number
                );
            }
            Ok(page)
        }
    }

    fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        self.cache.invalidate(prefix) + self.inner.invalidate(prefix)
    }
}
