//! Incremental Accumulator
//!
//! Builds one growing list out of successive pages of a resource.
//!
//! ```text
//!            reset()                       load_more()
//! Empty ──────────────▶ Loading(1) ──▶ Ready ⇄ Loading(N+1) ──▶ Exhausted
//!   ▲                       ▲                                     │
//!   └── (first load fails) └──────────── reset() ◀───────────────┘
//! ```
//!
//! At most one fetch is in flight per accumulator. Every `reset()` starts a
//! new epoch; a completion tagged with an older epoch is dropped on arrival,
//! so a page requested before a reset can never leak into the reset list.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::fetcher::PageFetcher;
use super::page::{PageRequest, PageResult};
use crate::domain::ResourceKind;
use crate::error::Result;
use crate::eventing::{AppEvent, Notifier};

/// Observable lifecycle of an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorPhase {
    /// Nothing loaded yet
    Empty,
    /// A fetch for `page` is in flight
    Loading { page: u32 },
    /// Items loaded and the last page was full
    Ready,
    /// The last page was short; `load_more` is a no-op
    Exhausted,
}

/// Why a call did not issue a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No resource id to page through
    Gated,
    /// Another fetch is still running
    InFlight,
    /// The last page was short
    Exhausted,
}

/// What a `load_more` / `reset` call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page landed in the list
    Applied { page: u32, received: usize },
    /// No fetch was issued
    Skipped(SkipReason),
    /// The fetch completed after a newer reset and was dropped
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Merge {
    Append,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    epoch: u64,
    page: u32,
}

#[derive(Debug)]
struct State<T> {
    items: Vec<T>,
    /// Last page merged into `items`; 0 until the first page lands
    current_page: u32,
    has_more: bool,
    epoch: u64,
    in_flight: Option<InFlight>,
    loaded: bool,
}

/// Client-held list accumulated from paginated fetches
pub struct IncrementalAccumulator<T, F> {
    kind: ResourceKind,
    resource_id: String,
    page_size: u32,
    fetcher: F,
    notifier: Arc<dyn Notifier>,
    state: Mutex<State<T>>,
}

impl<T, F> IncrementalAccumulator<T, F>
where
    T: Send,
    F: PageFetcher<T>,
{
    /// Create an empty accumulator for the children of `resource_id`
    pub fn new(
        kind: ResourceKind,
        resource_id: impl Into<String>,
        page_size: u32,
        fetcher: F,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            kind,
            resource_id: resource_id.into(),
            page_size,
            fetcher,
            notifier,
            state: Mutex::new(State {
                items: Vec::new(),
                current_page: 0,
                has_more: true,
                epoch: 0,
                in_flight: None,
                loaded: false,
            }),
        }
    }

    /// Fetch the page after the last merged one and append it
    ///
    /// No-op while a fetch is in flight or once the list is exhausted. On
    /// failure the list and page counter are left as they were, so calling
    /// again re-requests the same page.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let (request, epoch) = {
            let mut state = self.lock();
            if let Some(reason) = self.skip_reason(&state) {
                return Ok(LoadOutcome::Skipped(reason));
            }
            if !state.has_more {
                return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
            }
            let page = state.current_page + 1;
            let request = self.request(page)?;
            state.in_flight = Some(InFlight {
                epoch: state.epoch,
                page,
            });
            (request, state.epoch)
        };
        let _guard = InFlightGuard::new(self, epoch, request.page_number);

        tracing::debug!(
            "Loading {}/{} page {} (epoch {})",
            self.kind,
            self.resource_id,
            request.page_number,
            epoch
        );
        let result = self.fetcher.fetch(&request).await;
        self.settle(&request, epoch, Merge::Append, result)
    }

    /// Restart pagination from page 1 and replace the list with its result
    ///
    /// Any fetch still in flight belongs to the previous epoch and is dropped
    /// when it completes. On failure the previous items stay visible.
    pub async fn reset(&self) -> Result<LoadOutcome> {
        let (request, epoch) = {
            let mut state = self.lock();
            if self.resource_id.trim().is_empty() {
                return Ok(LoadOutcome::Skipped(SkipReason::Gated));
            }
            let request = self.request(1)?;
            state.epoch += 1;
            state.in_flight = Some(InFlight {
                epoch: state.epoch,
                page: 1,
            });
            (request, state.epoch)
        };
        let _guard = InFlightGuard::new(self, epoch, 1);

        tracing::info!(
            "Resetting {}/{} (epoch {})",
            self.kind,
            self.resource_id,
            epoch
        );
        let result = self.fetcher.fetch(&request).await;
        self.settle(&request, epoch, Merge::Replace, result)
    }

    fn skip_reason(&self, state: &State<T>) -> Option<SkipReason> {
        if self.resource_id.trim().is_empty() {
            Some(SkipReason::Gated)
        } else if state.in_flight.is_some() {
            Some(SkipReason::InFlight)
        } else {
            None
        }
    }

    fn request(&self, page: u32) -> Result<PageRequest> {
        PageRequest::new(self.kind, self.resource_id.clone(), page, self.page_size)
    }

    fn settle(
        &self,
        request: &PageRequest,
        epoch: u64,
        merge: Merge,
        result: Result<PageResult<T>>,
    ) -> Result<LoadOutcome> {
        let mut state = self.lock();
        if state.epoch != epoch {
            tracing::debug!(
                "Discarding {}/{} page {} from stale epoch {} (now {})",
                self.kind,
                self.resource_id,
                request.page_number,
                epoch,
                state.epoch
            );
            return Ok(LoadOutcome::Discarded);
        }
        state.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                drop(state);
                tracing::warn!(
                    "Failed to load {}/{} page {}: {}",
                    self.kind,
                    self.resource_id,
                    request.page_number,
                    e
                );
                self.notifier
                    .notify_error(&format!("Could not load {}: {e}", self.kind));
                return Err(e);
            }
        };

        let received = page.returned_count();
        state.has_more = page.is_full(self.page_size);
        match merge {
            Merge::Append => {
                state.items.extend(page.items);
                state.current_page = request.page_number;
            }
            Merge::Replace => {
                state.items = page.items;
                state.current_page = 1;
            }
        }
        state.loaded = true;

        let event = AppEvent::ListUpdated {
            kind: self.kind,
            len: state.items.len(),
            has_more: state.has_more,
        };
        drop(state);
        self.notifier.publish(event);

        Ok(LoadOutcome::Applied {
            page: request.page_number,
            received,
        })
    }
}

impl<T, F> IncrementalAccumulator<T, F> {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Last page merged into the list (0 before anything loaded)
    pub fn current_page(&self) -> u32 {
        self.lock().current_page
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Number of resets so far
    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn phase(&self) -> AccumulatorPhase {
        let state = self.lock();
        match state.in_flight {
            Some(flight) => AccumulatorPhase::Loading { page: flight.page },
            None if !state.loaded => AccumulatorPhase::Empty,
            None if state.has_more => AccumulatorPhase::Ready,
            None => AccumulatorPhase::Exhausted,
        }
    }

    /// Snapshot of the accumulated items
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().items.clone()
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight record when a fetch is dropped before it settles
///
/// A settled fetch has already cleared (or been superseded in) the record,
/// so dropping the guard afterwards changes nothing.
struct InFlightGuard<'a, T, F> {
    accumulator: &'a IncrementalAccumulator<T, F>,
    flight: InFlight,
}

impl<'a, T, F> InFlightGuard<'a, T, F> {
    fn new(accumulator: &'a IncrementalAccumulator<T, F>, epoch: u64, page: u32) -> Self {
        Self {
            accumulator,
            flight: InFlight { epoch, page },
        }
    }
}

impl<T, F> Drop for InFlightGuard<'_, T, F> {
    fn drop(&mut self) {
        let mut state = self.accumulator.lock();
        if state.in_flight == Some(self.flight) {
            state.in_flight = None;
            tracing::debug!(
                "Abandoned {}/{} page {} (epoch {})",
                self.accumulator.kind,
                self.accumulator.resource_id,
                self.flight.page,
                self.flight.epoch
            );
        }
    }
}

impl<T, F> std::fmt::Debug for IncrementalAccumulator<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalAccumulator")
            .field("kind", &self.kind)
            .field("resource_id", &self.resource_id)
            .field("page_size", &self.page_size)
            .field("phase", &self.phase())
            .field("len", &self.len())
            .finish()
    }
}
