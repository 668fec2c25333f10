//! ListView - One "Load More" List per Collection
//!
//! Typed call site for the paging layer: owns the accumulator for the
//! currently selected parent, the page cache in front of the backend, and
//! routes writes through the mutation bridge so the list is rebuilt after
//! every successful create/update/delete.

use std::sync::Arc;

use crate::domain::{Announcement, Comment, Resource, ResourceKind, Section};
use crate::error::{Error, Result};
use crate::eventing::{MutationKind, Notifier};
use crate::paging::{
    AccumulatorPhase, CachedFetcher, IncrementalAccumulator, LoadOutcome, LruPageCache,
    MutationBridge, MutationOutcome, SkipReason,
};
use crate::services::{ApiClient, RecordStore};

type ViewFetcher<R, S> = CachedFetcher<Arc<S>, LruPageCache<R>>;

/// Incremental list of `R` scoped to one parent at a time
pub struct ListView<R: Resource, S> {
    store: Arc<S>,
    cache: Arc<LruPageCache<R>>,
    notifier: Arc<dyn Notifier>,
    page_size: u32,
    accumulator: Option<IncrementalAccumulator<R, ViewFetcher<R, S>>>,
}

/// Course announcements
pub type AnnouncementsView<S = ApiClient> = ListView<Announcement, S>;
/// Module sections
pub type SectionsView<S = ApiClient> = ListView<Section, S>;
/// Discussion comments
pub type CommentsView<S = ApiClient> = ListView<Comment, S>;

impl<R, S> ListView<R, S>
where
    R: Resource,
    S: RecordStore<R>,
{
    pub fn new(
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
        cache_capacity: usize,
    ) -> Self {
        Self {
            store,
            cache: Arc::new(LruPageCache::new(cache_capacity)),
            notifier,
            page_size,
            accumulator: None,
        }
    }

    /// Start a fresh list for `parent_id` and load its first page
    pub async fn mount(&mut self, parent_id: &str) -> Result<LoadOutcome> {
        tracing::info!("Mounting {} list for {}", R::KIND, parent_id);
        let accumulator = IncrementalAccumulator::new(
            R::KIND,
            parent_id,
            self.page_size,
            CachedFetcher::new(self.store.clone(), self.cache.clone()),
            self.notifier.clone(),
        );
        let accumulator = self.accumulator.insert(accumulator);
        accumulator.reset().await
    }

    /// Switch to another parent; `None` when it is already mounted
    pub async fn retarget(&mut self, parent_id: &str) -> Result<Option<LoadOutcome>> {
        if self.parent_id() == Some(parent_id) {
            return Ok(None);
        }
        self.mount(parent_id).await.map(Some)
    }

    /// Drop the current list
    pub fn unmount(&mut self) {
        if let Some(accumulator) = self.accumulator.take() {
            tracing::debug!(
                "Unmounting {} list for {}",
                R::KIND,
                accumulator.resource_id()
            );
        }
    }

    /// Append the next page
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        match &self.accumulator {
            Some(accumulator) => accumulator.load_more().await,
            None => Ok(LoadOutcome::Skipped(SkipReason::Gated)),
        }
    }

    /// Drop cached pages and rebuild from page 1
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        match &self.accumulator {
            Some(accumulator) => MutationBridge::new(accumulator).refresh().await,
            None => Ok(LoadOutcome::Skipped(SkipReason::Gated)),
        }
    }

    /// Create a record under the mounted parent, then refresh
    pub async fn create(&self, draft: &R::Draft) -> Result<MutationOutcome<R>> {
        let accumulator = self.mounted()?;
        MutationBridge::new(accumulator)
            .apply(
                MutationKind::Create,
                self.store.create(accumulator.resource_id(), draft),
            )
            .await
    }

    /// Update a record, then refresh
    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<MutationOutcome<R>> {
        let accumulator = self.mounted()?;
        MutationBridge::new(accumulator)
            .apply(MutationKind::Update, self.store.update(id, draft))
            .await
    }

    /// Delete a record, then refresh
    pub async fn delete(&self, id: &str) -> Result<MutationOutcome<()>> {
        let accumulator = self.mounted()?;
        MutationBridge::new(accumulator)
            .apply(MutationKind::Delete, self.store.delete(id))
            .await
    }

    fn mounted(&self) -> Result<&IncrementalAccumulator<R, ViewFetcher<R, S>>> {
        self.accumulator
            .as_ref()
            .ok_or_else(|| Error::invalid(format!("{} list is not mounted", R::KIND)))
    }
}

impl<R: Resource, S> ListView<R, S> {
    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }

    /// Parent the list is currently scoped to
    pub fn parent_id(&self) -> Option<&str> {
        self.accumulator.as_ref().map(|a| a.resource_id())
    }

    pub fn items(&self) -> Vec<R> {
        self.accumulator
            .as_ref()
            .map(|a| a.items())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.accumulator.as_ref().map_or(0, |a| a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_more(&self) -> bool {
        self.accumulator.as_ref().is_some_and(|a| a.has_more())
    }

    pub fn current_page(&self) -> u32 {
        self.accumulator.as_ref().map_or(0, |a| a.current_page())
    }

    pub fn phase(&self) -> AccumulatorPhase {
        self.accumulator
            .as_ref()
            .map_or(AccumulatorPhase::Empty, |a| a.phase())
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }
}
