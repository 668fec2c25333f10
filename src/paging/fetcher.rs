//! PageFetcher Trait
//!
//! Abstraction over the remote data source so the accumulator can run
//! against the REST client, a cache wrapper, or a scripted source in tests.

use std::future::Future;
use std::sync::Arc;

use super::page::{KeyPrefix, PageRequest, PageResult};
use crate::error::Result;

/// Fetches one page of `T`
///
/// Implementations keep server order and never dedup. Failures are returned
/// as-is; nothing here retries.
pub trait PageFetcher<T>: Send + Sync {
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = Result<PageResult<T>>> + Send;

    /// Forget anything held for `prefix`; returns how many pages were dropped
    ///
    /// Only caching fetchers hold pages, so the default does nothing.
    fn invalidate(&self, _prefix: &KeyPrefix) -> usize {
        0
    }
}

impl<T, F> PageFetcher<T> for Arc<F>
where
    F: PageFetcher<T>,
{
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = Result<PageResult<T>>> + Send {
        (**self).fetch(request)
    }

    fn invalidate(&self, prefix: &KeyPrefix) -> usize {
        (**self).invalidate(prefix)
    }
}
