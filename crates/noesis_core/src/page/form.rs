//! Entry create/edit form state and boundary validation.

use crate::model::entry::{Entry, EntryDraft, EntryId, EntryPatch, EntryType};
use crate::model::landmark::LandmarkId;
use crate::store::memory_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What a submitted form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create { landmark_id: LandmarkId },
    Edit { entry_id: EntryId },
}

/// Form-boundary failure for the entry flow.
#[derive(Debug)]
pub enum FormError {
    /// `save_form` called with no form open.
    NoActiveForm,
    /// Title is empty or whitespace.
    BlankTitle,
    /// The content field required by the entry type is blank.
    MissingContent(EntryType),
    /// The entry being edited no longer exists.
    EntryNotFound(EntryId),
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveForm => write!(f, "no entry form is open"),
            Self::BlankTitle => write!(f, "entry title must not be blank"),
            Self::MissingContent(kind) => {
                write!(f, "`{}` entries need their primary content", kind.as_str())
            }
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Editable field values of the entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub mode: FormMode,
    pub kind: EntryType,
    pub title: String,
    pub text: String,
    pub link: String,
    pub attachment_name: String,
    pub sketch_note: String,
    pub tags: Vec<String>,
    pub related_material_ids: Vec<String>,
}

impl EntryForm {
    /// Empty form for a new entry under `landmark_id`.
    pub fn for_create(landmark_id: impl Into<LandmarkId>) -> Self {
        Self {
            mode: FormMode::Create {
                landmark_id: landmark_id.into(),
            },
            kind: EntryType::default(),
            title: String::new(),
            text: String::new(),
            link: String::new(),
            attachment_name: String::new(),
            sketch_note: String::new(),
            tags: Vec::new(),
            related_material_ids: Vec::new(),
        }
    }

    /// Form pre-filled from an existing entry.
    pub fn for_edit(entry: &Entry) -> Self {
        Self {
            mode: FormMode::Edit {
                entry_id: entry.id.clone(),
            },
            kind: entry.kind,
            title: entry.title.clone(),
            text: entry.text.clone(),
            link: entry.link.clone(),
            attachment_name: entry.attachment_name.clone(),
            sketch_note: entry.sketch_note.clone(),
            tags: entry.tags.clone(),
            related_material_ids: entry.related_material_ids.clone(),
        }
    }

    /// Replaces tags from comma-separated user input, dropping blanks.
    pub fn set_tags_from_input(&mut self, input: &str) {
        self.tags = input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Checks the title and the content field required by `kind`.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::BlankTitle);
        }

        let primary = match self.kind {
            EntryType::Text => &self.text,
            EntryType::Link => &self.link,
            EntryType::Photo => &self.attachment_name,
            EntryType::Sketch => &self.sketch_note,
        };
        if primary.trim().is_empty() {
            return Err(FormError::MissingContent(self.kind));
        }
        Ok(())
    }

    pub(crate) fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            category: None,
            title: Some(self.title.trim().to_string()),
            text: Some(self.text.clone()),
            link: Some(self.link.trim().to_string()),
            attachment_name: Some(self.attachment_name.clone()),
            sketch_note: Some(self.sketch_note.clone()),
            kind: Some(self.kind),
            tags: self.tags.clone(),
            related_material_ids: self.related_material_ids.clone(),
        }
    }

    pub(crate) fn to_patch(&self) -> EntryPatch {
        EntryPatch {
            landmark_id: None,
            category: None,
            title: Some(self.title.trim().to_string()),
            text: Some(self.text.clone()),
            link: Some(self.link.trim().to_string()),
            attachment_name: Some(self.attachment_name.clone()),
            sketch_note: Some(self.sketch_note.clone()),
            kind: Some(self.kind),
            tags: Some(self.tags.clone()),
            related_material_ids: Some(self.related_material_ids.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryForm, FormError};
    use crate::model::entry::EntryType;

    #[test]
    fn validate_requires_title_then_primary_content() {
        let mut form = EntryForm::for_create("health-garden");
        assert!(matches!(form.validate(), Err(FormError::BlankTitle)));

        form.title = "Morning run".to_string();
        assert!(matches!(
            form.validate(),
            Err(FormError::MissingContent(EntryType::Text))
        ));

        form.kind = EntryType::Link;
        form.link = "https://example.com/run".to_string();
        form.validate().unwrap();
    }

    #[test]
    fn tags_input_is_split_and_trimmed() {
        let mut form = EntryForm::for_create("health-garden");
        form.set_tags_from_input(" sport, ,Habits ,sport");
        assert_eq!(form.tags, vec!["sport", "Habits", "sport"]);
    }
}
