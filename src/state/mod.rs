//! State - List Views and Their Selection Context
//!
//! Each view owns the accumulator for one collection; the workspace keeps
//! all three pointed at whatever the user currently has open.

pub mod context;
pub mod list_view;
pub mod workspace;

pub use context::ViewContext;
pub use list_view::{AnnouncementsView, CommentsView, ListView, SectionsView};
pub use workspace::Workspace;
