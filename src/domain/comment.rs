//! Comment - Discussion Forum Comment

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceKind};
use crate::helpers::truncate;

/// A comment posted to a discussion thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub discussion_id: String,
    pub author: String,
    pub body: String,
    /// Parent comment when this is a reply
    #[serde(default)]
    pub reply_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

/// Create/update payload for a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl Resource for Comment {
    type Draft = CommentDraft;

    const KIND: ResourceKind = ResourceKind::Comments;

    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        let marker = if self.is_reply() { "  re: " } else { "" };
        format!("{marker}{}: {}", self.author, truncate(&self.body, 60))
    }
}
