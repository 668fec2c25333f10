//! In-memory fetchers for paging tests

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

use super::fetcher::PageFetcher;
use super::page::{PageRequest, PageResult};
use crate::error::{Error, Result};

enum Script<T> {
    Ready(Result<Vec<T>>),
    Gated(oneshot::Receiver<Result<Vec<T>>>),
}

/// Answers fetches from a queue of scripted responses, in call order
pub struct ScriptedFetcher<T> {
    script: Mutex<VecDeque<Script<T>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl<T> ScriptedFetcher<T> {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, items: Vec<T>) {
        self.push(Script::Ready(Ok(items)));
    }

    pub fn fail(&self, message: &str) {
        self.push(Script::Ready(Err(Error::Api {
            status: 503,
            message: message.to_string(),
        })));
    }

    /// Queue a response the test completes later through the returned sender
    pub fn gate(&self) -> oneshot::Sender<Result<Vec<T>>> {
        let (tx, rx) = oneshot::channel();
        self.push(Script::Gated(rx));
        tx
    }

    /// Every request seen so far
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests().iter().map(|r| r.page_number).collect()
    }

    fn push(&self, script: Script<T>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(script);
    }
}

impl<T: Send + Sync> PageFetcher<T> for ScriptedFetcher<T> {
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = Result<PageResult<T>>> + Send {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        async move {
            let items = match next {
                Some(Script::Ready(result)) => result?,
                Some(Script::Gated(rx)) => rx
                    .await
                    .map_err(|_| Error::invalid("gate dropped"))??,
                None => return Err(Error::invalid("no scripted response")),
            };
            Ok(PageResult::new(items))
        }
    }
}

/// Serves pages out of a mutable backing collection
pub struct CollectionFetcher<T> {
    items: Mutex<Vec<T>>,
}

impl<T: Clone> CollectionFetcher<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// Insert at the front, the way a newest-first collection grows
    pub fn prepend(&self, item: T) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, item);
    }
}

impl<T: Clone + Send + Sync> PageFetcher<T> for CollectionFetcher<T> {
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = Result<PageResult<T>>> + Send {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let size = request.page_size as usize;
        let start = (request.page_number as usize - 1) * size;
        let page: Vec<T> = items.iter().skip(start).take(size).cloned().collect();
        drop(items);
        async move { Ok(PageResult::new(page)) }
    }
}
