//! Workspace - The Three Lists Behind a Course Page

use std::sync::Arc;

use super::context::ViewContext;
use super::list_view::{AnnouncementsView, CommentsView, ListView, SectionsView};
use crate::connection::ClientConfig;
use crate::domain::{Announcement, Comment, Resource, Section};
use crate::error::Result;
use crate::eventing::Notifier;
use crate::services::RecordStore;

/// Announcements, sections and comments views sharing one store
pub struct Workspace<S> {
    pub announcements: AnnouncementsView<S>,
    pub sections: SectionsView<S>,
    pub comments: CommentsView<S>,
}

impl<S> Workspace<S>
where
    S: RecordStore<Announcement> + RecordStore<Section> + RecordStore<Comment>,
{
    pub fn new(store: Arc<S>, notifier: Arc<dyn Notifier>, config: &ClientConfig) -> Self {
        Self {
            announcements: ListView::new(
                store.clone(),
                notifier.clone(),
                config.page_size,
                config.cache_capacity,
            ),
            sections: ListView::new(
                store.clone(),
                notifier.clone(),
                config.page_size,
                config.cache_capacity,
            ),
            comments: ListView::new(store, notifier, config.page_size, config.cache_capacity),
        }
    }

    /// Point every view at the parent `ctx` selects for it
    ///
    /// All views are updated even when one fails; the first error is
    /// returned after the others have been retargeted.
    pub async fn open(&mut self, ctx: &ViewContext) -> Result<()> {
        let results = [
            sync_view(&mut self.announcements, ctx).await,
            sync_view(&mut self.sections, ctx).await,
            sync_view(&mut self.comments, ctx).await,
        ];
        results.into_iter().collect()
    }
}

async fn sync_view<R, S>(view: &mut ListView<R, S>, ctx: &ViewContext) -> Result<()>
where
    R: Resource,
    S: RecordStore<R>,
{
    match ctx.parent_for(R::KIND) {
        Some(parent_id) => view.retarget(parent_id).await.map(|_| ()),
        None => {
            view.unmount();
            Ok(())
        }
    }
}
