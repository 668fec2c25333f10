//! Mutation-to-Reset Bridge
//!
//! After a create/update/delete succeeds, the affected list is rebuilt from
//! page 1 instead of being patched in place. Cached pages for the resource
//! are dropped first so the reset sees the server's current ordering.

use std::future::Future;

use super::accumulator::{IncrementalAccumulator, LoadOutcome};
use super::fetcher::PageFetcher;
use super::page::KeyPrefix;
use crate::error::Result;
use crate::eventing::{AppEvent, MutationKind};

/// Result of a mutation routed through the bridge
#[derive(Debug)]
pub struct MutationOutcome<M> {
    /// What the mutation itself returned
    pub value: M,
    /// How the follow-up reset went; `None` when the reset failed
    pub refreshed: Option<LoadOutcome>,
}

/// Wires successful mutations to a reset of one accumulator
pub struct MutationBridge<'a, T, F> {
    accumulator: &'a IncrementalAccumulator<T, F>,
}

impl<'a, T, F> MutationBridge<'a, T, F>
where
    T: Send,
    F: PageFetcher<T>,
{
    pub fn new(accumulator: &'a IncrementalAccumulator<T, F>) -> Self {
        Self { accumulator }
    }

    /// Invalidate pages held by the accumulator's fetcher, then reset the list
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        self.accumulator.fetcher().invalidate(&KeyPrefix::new(
            self.accumulator.kind(),
            self.accumulator.resource_id(),
        ));
        self.accumulator.reset().await
    }

    /// Await `mutation`; when it succeeds, refresh the list
    ///
    /// A failed mutation is reported and leaves the list untouched. A failed
    /// refresh has already been reported by the accumulator, so the mutation
    /// still counts as applied.
    pub async fn apply<M, Fut>(&self, mutation: MutationKind, fut: Fut) -> Result<MutationOutcome<M>>
    where
        Fut: Future<Output = Result<M>>,
    {
        let kind = self.accumulator.kind();
        let value = match fut.await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{:?} on {} failed: {}", mutation, kind, e);
                self.accumulator
                    .notifier()
                    .notify_error(&format!("Could not save {kind}: {e}"));
                return Err(e);
            }
        };

        tracing::info!("{:?} on {} succeeded, refreshing list", mutation, kind);
        let refreshed = self.refresh().await.ok();
        self.accumulator
            .notifier()
            .publish(AppEvent::MutationApplied { kind, mutation });

        Ok(MutationOutcome { value, refreshed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use crate::error::Error;
    use crate::eventing::ChannelNotifier;
    use crate::paging::cache::{CachedFetcher, LruPageCache};
    use crate::paging::testing::ScriptedFetcher;
    use crossbeam_channel::unbounded;
    use futures::poll;
    use std::sync::Arc;

    type Fetcher = CachedFetcher<Arc<ScriptedFetcher<u32>>, LruPageCache<u32>>;

    fn setup() -> (
        IncrementalAccumulator<u32, Fetcher>,
        Arc<ScriptedFetcher<u32>>,
        Arc<LruPageCache<u32>>,
        crossbeam_channel::Receiver<AppEvent>,
    ) {
        let source = Arc::new(ScriptedFetcher::new());
        let cache = Arc::new(LruPageCache::new(16));
        let (tx, rx) = unbounded();
        let acc = IncrementalAccumulator::new(
            ResourceKind::Comments,
            "d1",
            3,
            CachedFetcher::new(source.clone(), cache.clone()),
            Arc::new(ChannelNotifier::new(tx)),
        );
        (acc, source, cache, rx)
    }

    #[tokio::test]
    async fn successful_mutation_invalidates_and_resets() {
        let (acc, source, cache, rx) = setup();
        source.respond(vec![1, 2, 3]);
        source.respond(vec![4]);
        acc.reset().await.expect("page 1");
        acc.load_more().await.expect("page 2");
        assert_eq!(cache.len(), 2);

        source.respond(vec![9, 1, 2]);
        let bridge = MutationBridge::new(&acc);
        let outcome = bridge
            .apply(MutationKind::Create, async { Ok::<_, Error>("c-9") })
            .await
            .expect("mutation");

        assert_eq!(outcome.value, "c-9");
        assert_eq!(
            outcome.refreshed,
            Some(LoadOutcome::Applied { page: 1, received: 3 })
        );
        assert_eq!(acc.items(), vec![9, 1, 2]);
        assert_eq!(acc.current_page(), 1);
        // Page 1 was re-fetched rather than served from the stale cache
        assert_eq!(source.requested_pages(), vec![1, 2, 1]);
        assert!(rx.try_iter().any(|e| matches!(
            e,
            AppEvent::MutationApplied {
                mutation: MutationKind::Create,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn failed_mutation_leaves_list_alone() {
        let (acc, source, cache, rx) = setup();
        source.respond(vec![1, 2, 3]);
        acc.reset().await.expect("page 1");
        let _ = rx.try_iter().count();

        let bridge = MutationBridge::new(&acc);
        let result = bridge
            .apply(MutationKind::Delete, async {
                Err::<(), _>(Error::Api {
                    status: 403,
                    message: "forbidden".into(),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(acc.items(), vec![1, 2, 3]);
        assert_eq!(acc.epoch(), 1);
        assert_eq!(source.requested_pages(), vec![1]);
        assert_eq!(cache.len(), 1);
        let notices: Vec<_> = rx
            .try_iter()
            .filter_map(|e| e.message().map(str::to_string))
            .collect();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("forbidden"));
    }

    #[tokio::test]
    async fn sequential_mutations_reset_twice_and_last_wins() {
        let (acc, source, _cache, _rx) = setup();
        source.respond(vec![1, 2, 3]);
        acc.reset().await.expect("page 1");

        let bridge = MutationBridge::new(&acc);
        source.respond(vec![5, 1, 2]);
        bridge
            .apply(MutationKind::Create, async { Ok::<_, Error>(()) })
            .await
            .expect("first");
        source.respond(vec![6, 5, 1]);
        bridge
            .apply(MutationKind::Create, async { Ok::<_, Error>(()) })
            .await
            .expect("second");

        assert_eq!(acc.items(), vec![6, 5, 1]);
        assert_eq!(acc.epoch(), 3);
    }

    #[tokio::test]
    async fn failed_refresh_still_reports_mutation() {
        let (acc, source, cache, _rx) = setup();
        source.respond(vec![1, 2, 3]);
        acc.reset().await.expect("page 1");
        assert_eq!(cache.len(), 1);

        source.fail("offline");
        let outcome = MutationBridge::new(&acc)
            .apply(MutationKind::Update, async { Ok::<_, Error>(7) })
            .await
            .expect("mutation");

        assert_eq!(outcome.value, 7);
        assert!(outcome.refreshed.is_none());
        assert_eq!(acc.items(), vec![1, 2, 3]);
        // The refresh went to the source instead of the cached page 1
        assert_eq!(source.requested_pages(), vec![1, 1]);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn page_in_flight_across_a_mutation_is_not_cached() {
        let (acc, source, cache, _rx) = setup();
        source.respond(vec![1, 2, 3]);
        acc.reset().await.expect("page 1");

        // Page 2 leaves before the create and lands after the reset
        let old_page2 = source.gate();
        let mut pending = Box::pin(acc.load_more());
        assert!(poll!(&mut pending).is_pending());

        source.respond(vec![0, 1, 2]);
        MutationBridge::new(&acc)
            .apply(MutationKind::Create, async { Ok::<_, Error>(()) })
            .await
            .expect("mutation");

        old_page2.send(Ok(vec![4, 5, 6])).expect("send");
        assert_eq!(pending.await.expect("stale"), LoadOutcome::Discarded);
        assert_eq!(cache.len(), 1);

        source.respond(vec![3, 4, 5]);
        acc.load_more().await.expect("page 2");
        assert_eq!(acc.items(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(source.requested_pages(), vec![1, 2, 1, 2]);
    }
}
