//! Announcement - Course Announcement Data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceKind};
use crate::helpers::format_datetime;

/// A course announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Unique ID
    pub id: String,
    /// Owning course
    pub course_id: String,
    /// Headline
    pub title: String,
    /// Body text (already rendered by the authoring side)
    #[serde(default)]
    pub body: String,
    /// Display name of the author
    #[serde(default)]
    pub author: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for an announcement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementDraft {
    pub title: String,
    pub body: String,
}

impl Resource for Announcement {
    type Draft = AnnouncementDraft;

    const KIND: ResourceKind = ResourceKind::Announcements;

    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        format!("[{}] {}", format_datetime(&self.created_at), self.title)
    }
}
