//! Section - Module Section and Authored Content

use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceKind};

/// A piece of content attached to a section, discriminated by `contentType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "contentType", rename_all = "camelCase")]
pub enum SectionContent {
    /// Inline text block
    Text { body: String },
    /// Hosted video
    #[serde(rename_all = "camelCase")]
    Video {
        url: String,
        #[serde(default)]
        duration_secs: Option<u32>,
    },
    /// Downloadable document
    #[serde(rename_all = "camelCase")]
    Document { url: String, file_name: String },
    /// External link
    Link { url: String, label: String },
}

impl SectionContent {
    pub fn label(&self) -> &'static str {
        match self {
            SectionContent::Text { .. } => "Text",
            SectionContent::Video { .. } => "Video",
            SectionContent::Document { .. } => "Document",
            SectionContent::Link { .. } => "Link",
        }
    }
}

/// A section inside a course module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique ID
    pub id: String,
    /// Owning module
    pub module_id: String,
    /// Section title
    pub title: String,
    /// Server-side ordering key
    #[serde(default)]
    pub position: u32,
    /// Attached content, in display order
    #[serde(default)]
    pub contents: Vec<SectionContent>,
}

/// Create/update payload for a section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default)]
    pub contents: Vec<SectionContent>,
}

impl Resource for Section {
    type Draft = SectionDraft;

    const KIND: ResourceKind = ResourceKind::Sections;

    fn id(&self) -> &str {
        &self.id
    }

    fn summary(&self) -> String {
        let labels: Vec<&str> = self.contents.iter().map(SectionContent::label).collect();
        if labels.is_empty() {
            format!("{}. {}", self.position, self.title)
        } else {
            format!("{}. {} ({})", self.position, self.title, labels.join(", "))
        }
    }
}
