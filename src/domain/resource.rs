//! Resource - Paginated Backend Collections

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Backend collections the client pages through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Course announcements, parented by a course
    Announcements,
    /// Module sections, parented by a module
    Sections,
    /// Discussion comments, parented by a discussion thread
    Comments,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Announcements,
        ResourceKind::Sections,
        ResourceKind::Comments,
    ];

    /// REST path segment
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Announcements => "announcements",
            ResourceKind::Sections => "sections",
            ResourceKind::Comments => "comments",
        }
    }

    /// Query parameter (and body field) naming the parent entity
    pub fn parent_param(&self) -> &'static str {
        match self {
            ResourceKind::Announcements => "course",
            ResourceKind::Sections => "module",
            ResourceKind::Comments => "discussion",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid(format!("Unknown resource: {s}")))
    }
}

/// A record type living in one of the paginated collections
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Payload used to create or update a record
    type Draft: Serialize + Send + Sync;

    /// The collection this record belongs to
    const KIND: ResourceKind;

    /// Server-assigned identifier
    fn id(&self) -> &str;

    /// One-line description for list output
    fn summary(&self) -> String;
}
