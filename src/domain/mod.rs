//! Domain - Pure Data Structures for the LMS Collections
//!
//! These types carry no I/O and represent the records the API pages through.

pub mod announcement;
pub mod comment;
pub mod resource;
pub mod section;

pub use announcement::{Announcement, AnnouncementDraft};
pub use comment::{Comment, CommentDraft};
pub use resource::{Resource, ResourceKind};
pub use section::{Section, SectionContent, SectionDraft};
