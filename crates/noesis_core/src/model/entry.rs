//! Entry domain model.
//!
//! # Responsibility
//! - Define the user-authored note record persisted per landmark.
//! - Provide the explicit factory that documents every field default.
//! - Provide shallow patch-merge semantics for updates.
//!
//! # Invariants
//! - `id` and `created_at` are set once by the factory and never patched.
//! - The store does not enforce consistency between `kind` and populated
//!   content fields; that check lives at the page form boundary.

use crate::model::landmark::{Category, LandmarkId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of one entry within a user's collection.
///
/// Generated entries use UUID v4 text; persisted ids are accepted as-is.
pub type EntryId = String;

/// Discriminator for the primary content field of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Primary content lives in `text`.
    #[default]
    Text,
    /// Primary content lives in `link`.
    Link,
    /// Primary content lives in `attachment_name`.
    Photo,
    /// Primary content lives in `sketch_note`.
    Sketch,
}

impl EntryType {
    /// Returns the wire name used in persisted JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Link => "link",
            Self::Photo => "photo",
            Self::Sketch => "sketch",
        }
    }

    /// Parses a wire name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "link" => Some(Self::Link),
            "photo" => Some(Self::Photo),
            "sketch" => Some(Self::Sketch),
            _ => None,
        }
    }
}

/// User-authored note attached to a landmark.
///
/// Serialized with camelCase field names; every content field tolerates
/// absence in persisted JSON and defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    /// Foreign key into the landmark catalog; not checked for existence.
    pub landmark_id: LandmarkId,
    /// Copy of the landmark category taken at creation time.
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub attachment_name: String,
    #[serde(default)]
    pub sketch_note: String,
    /// Serialized as `type` to match the persisted snapshot naming.
    #[serde(rename = "type", default)]
    pub kind: EntryType,
    /// Ordered free-text tags; duplicates are kept.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ids into the external materials catalog.
    #[serde(default)]
    pub related_material_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation input for [`Entry::from_draft`].
///
/// Every `None` field takes the default listed on the factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub category: Option<Category>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub attachment_name: Option<String>,
    pub sketch_note: Option<String>,
    pub kind: Option<EntryType>,
    pub tags: Vec<String>,
    pub related_material_ids: Vec<String>,
}

impl EntryDraft {
    /// Starts a draft with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_kind(mut self, kind: EntryType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update for [`Entry::apply_patch`].
///
/// A `Some` field overwrites the entry field; `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub landmark_id: Option<LandmarkId>,
    pub category: Option<Category>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub attachment_name: Option<String>,
    pub sketch_note: Option<String>,
    pub kind: Option<EntryType>,
    pub tags: Option<Vec<String>>,
    pub related_material_ids: Option<Vec<String>>,
}

impl Entry {
    /// Builds a new entry from a creation draft.
    ///
    /// Defaults for fields left `None` in `draft`:
    /// - `category`: `landmark_category`
    /// - `title`, `text`, `link`, `attachment_name`, `sketch_note`: `""`
    /// - `kind`: [`EntryType::Text`]
    ///
    /// `tags` and `related_material_ids` are taken as given (empty by default).
    pub fn from_draft(
        id: EntryId,
        landmark_id: impl Into<LandmarkId>,
        landmark_category: Category,
        draft: EntryDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            landmark_id: landmark_id.into(),
            category: draft.category.unwrap_or(landmark_category),
            title: draft.title.unwrap_or_default(),
            text: draft.text.unwrap_or_default(),
            link: draft.link.unwrap_or_default(),
            attachment_name: draft.attachment_name.unwrap_or_default(),
            sketch_note: draft.sketch_note.unwrap_or_default(),
            kind: draft.kind.unwrap_or_default(),
            tags: draft.tags,
            related_material_ids: draft.related_material_ids,
            created_at,
        }
    }

    /// Shallow-merges `patch` into this entry.
    pub fn apply_patch(&mut self, patch: EntryPatch) {
        let EntryPatch {
            landmark_id,
            category,
            title,
            text,
            link,
            attachment_name,
            sketch_note,
            kind,
            tags,
            related_material_ids,
        } = patch;

        if let Some(value) = landmark_id {
            self.landmark_id = value;
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = text {
            self.text = value;
        }
        if let Some(value) = link {
            self.link = value;
        }
        if let Some(value) = attachment_name {
            self.attachment_name = value;
        }
        if let Some(value) = sketch_note {
            self.sketch_note = value;
        }
        if let Some(value) = kind {
            self.kind = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        if let Some(value) = related_material_ids {
            self.related_material_ids = value;
        }
    }

    /// Returns the content field selected by `kind`.
    pub fn primary_content(&self) -> &str {
        match self.kind {
            EntryType::Text => &self.text,
            EntryType::Link => &self.link,
            EntryType::Photo => &self.attachment_name,
            EntryType::Sketch => &self.sketch_note,
        }
    }

    /// Returns whether any tag equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|value| value.to_lowercase() == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryDraft, EntryPatch, EntryType};
    use crate::model::landmark::Category;
    use chrono::Utc;

    fn sample() -> Entry {
        Entry::from_draft(
            "e1".to_string(),
            "lighthouse",
            Category::Thinking,
            EntryDraft::titled("A").with_text("B").with_tags(["x"]),
            Utc::now(),
        )
    }

    #[test]
    fn factory_fills_documented_defaults() {
        let entry = sample();
        assert_eq!(entry.category, Category::Thinking);
        assert_eq!(entry.kind, EntryType::Text);
        assert!(entry.link.is_empty());
        assert!(entry.attachment_name.is_empty());
        assert!(entry.sketch_note.is_empty());
        assert!(entry.related_material_ids.is_empty());
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut entry = sample();
        let before = entry.clone();
        entry.apply_patch(EntryPatch {
            title: Some("C".to_string()),
            ..EntryPatch::default()
        });

        assert_eq!(entry.title, "C");
        assert_eq!(entry.text, before.text);
        assert_eq!(entry.tags, before.tags);
        assert_eq!(entry.created_at, before.created_at);
    }

    #[test]
    fn primary_content_follows_kind() {
        let mut entry = sample();
        entry.link = "https://example.com".to_string();
        assert_eq!(entry.primary_content(), "B");
        entry.kind = EntryType::Link;
        assert_eq!(entry.primary_content(), "https://example.com");
    }

    #[test]
    fn has_tag_is_exact_and_case_insensitive() {
        let mut entry = sample();
        entry.tags = vec!["Finance".to_string()];
        assert!(entry.has_tag("finance"));
        assert!(!entry.has_tag("fin"));
    }
}
