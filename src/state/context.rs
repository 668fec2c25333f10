//! ViewContext - Current Course/Module/Discussion Selection
//!
//! Passed explicitly into the list views instead of living in a global store.

use crate::domain::ResourceKind;

/// Which course, module and discussion the user is looking at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub course_id: Option<String>,
    pub module_id: Option<String>,
    pub discussion_id: Option<String>,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
        self.module_id = Some(module_id.into());
        self
    }

    pub fn with_discussion(mut self, discussion_id: impl Into<String>) -> Self {
        self.discussion_id = Some(discussion_id.into());
        self
    }

    /// Parent id a list of `kind` is scoped to, if one is selected
    pub fn parent_for(&self, kind: ResourceKind) -> Option<&str> {
        let parent = match kind {
            ResourceKind::Announcements => &self.course_id,
            ResourceKind::Sections => &self.module_id,
            ResourceKind::Comments => &self.discussion_id,
        };
        parent.as_deref().filter(|id| !id.trim().is_empty())
    }
}
