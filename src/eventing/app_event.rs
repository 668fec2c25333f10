//! AppEvent - Application Event Enum
//!
//! Events sent from the list views to whatever renders them.

use chrono::{DateTime, Local};

use crate::domain::ResourceKind;

/// Kind of mutation applied to a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Application events for view -> UI communication
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User-facing failure message (toast/banner)
    Error {
        message: String,
        timestamp: DateTime<Local>,
    },

    /// A list finished loading a page or resetting
    ListUpdated {
        kind: ResourceKind,
        len: usize,
        has_more: bool,
    },

    /// A mutation went through and its list was refreshed
    MutationApplied {
        kind: ResourceKind,
        mutation: MutationKind,
    },
}

impl AppEvent {
    /// Create an error event with current timestamp
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Message text for error events
    pub fn message(&self) -> Option<&str> {
        match self {
            AppEvent::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}
