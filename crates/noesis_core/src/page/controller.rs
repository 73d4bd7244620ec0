//! Memory page state machine over a [`MemoryStore`].

use crate::config::CoreConfig;
use crate::kv::KeyValueStore;
use crate::model::entry::{Entry, EntryId};
use crate::model::landmark::{Category, Landmark};
use crate::page::form::{EntryForm, FormError, FormMode};
use crate::store::memory_store::{DeleteOutcome, MemoryStore, StoreResult, UpdateOutcome};
use log::{debug, info};

/// Modal currently shown on top of the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveModal {
    Closed,
    /// Landmark detail view ("pavilion") for the landmark id.
    Pavilion(String),
    EntryForm(EntryForm),
}

/// One map tile: a landmark and how many entries it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkTile<'a> {
    pub landmark: &'a Landmark,
    pub entry_count: usize,
}

/// UI controller for the memory page.
pub struct MemoryPage<S: KeyValueStore> {
    store: MemoryStore<S>,
    spotlight_size: usize,
    modal: ActiveModal,
    category_filter: Option<Category>,
    search_query: String,
    tag_filter: String,
}

impl<S: KeyValueStore> MemoryPage<S> {
    pub fn new(store: MemoryStore<S>, config: &CoreConfig) -> Self {
        Self {
            store,
            spotlight_size: config.spotlight_size,
            modal: ActiveModal::Closed,
            category_filter: None,
            search_query: String::new(),
            tag_filter: String::new(),
        }
    }

    pub fn store(&self) -> &MemoryStore<S> {
        &self.store
    }

    pub fn into_store(self) -> MemoryStore<S> {
        self.store
    }

    pub fn modal(&self) -> &ActiveModal {
        &self.modal
    }

    /// Selects a landmark and opens its pavilion.
    pub fn select_landmark(&mut self, landmark_id: &str) {
        self.store.select_landmark(landmark_id);
        self.modal = ActiveModal::Pavilion(landmark_id.to_string());
        debug!("event=page_select module=page status=ok landmark_id={landmark_id}");
    }

    pub fn close_modal(&mut self) {
        self.modal = ActiveModal::Closed;
    }

    pub fn set_category_filter(&mut self, category: Option<Category>) {
        self.category_filter = category;
    }

    pub fn category_filter(&self) -> Option<Category> {
        self.category_filter
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.tag_filter = tag.into();
    }

    pub fn tag_filter(&self) -> &str {
        &self.tag_filter
    }

    /// Map tiles after the category filter, in catalog order.
    pub fn visible_landmarks(&self) -> Vec<LandmarkTile<'_>> {
        let counts = self.store.landmark_entry_counts();
        self.store
            .catalog()
            .enumerate()
            .iter()
            .filter(|landmark| {
                self.category_filter
                    .map_or(true, |category| landmark.category == category)
            })
            .map(|landmark| LandmarkTile {
                landmark,
                entry_count: counts.get(&landmark.id).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Entries of the selected landmark, newest first.
    pub fn selected_entries(&self) -> Vec<&Entry> {
        match self.store.selected_landmark() {
            Some(landmark_id) => self.store.entries_by_landmark(landmark_id).collect(),
            None => Vec::new(),
        }
    }

    /// Entries matching the current search query and tag filter.
    pub fn search_results(&self) -> Vec<&Entry> {
        self.store.search_entries(&self.search_query, &self.tag_filter)
    }

    /// Most recent entries for the spotlight list.
    pub fn spotlight(&self) -> &[Entry] {
        self.store.recent_entries(self.spotlight_size)
    }

    /// Opens an empty form for a new entry under `landmark_id`.
    pub fn begin_create(&mut self, landmark_id: &str) {
        self.modal = ActiveModal::EntryForm(EntryForm::for_create(landmark_id));
    }

    /// Opens a pre-filled form for `entry_id`.
    ///
    /// # Errors
    /// - [`FormError::EntryNotFound`] when the id is unknown.
    pub fn begin_edit(&mut self, entry_id: &str) -> Result<(), FormError> {
        let entry = self
            .store
            .entry(entry_id)
            .ok_or_else(|| FormError::EntryNotFound(entry_id.to_string()))?;
        self.modal = ActiveModal::EntryForm(EntryForm::for_edit(entry));
        Ok(())
    }

    /// Mutable access to the open form, if any.
    pub fn form_mut(&mut self) -> Option<&mut EntryForm> {
        match &mut self.modal {
            ActiveModal::EntryForm(form) => Some(form),
            _ => None,
        }
    }

    /// Discards the open form and returns to the selected pavilion.
    pub fn cancel_form(&mut self) {
        if matches!(self.modal, ActiveModal::EntryForm(_)) {
            self.modal = self.pavilion_of_selection();
        }
    }

    /// Validates and submits the open form.
    ///
    /// Validation failures keep the form open. Once the store has been
    /// called the form closes back to the pavilion, also when the write
    /// failed, so a retry cannot create the entry twice.
    pub fn save_form(&mut self) -> Result<Entry, FormError> {
        let form = match &self.modal {
            ActiveModal::EntryForm(form) => form,
            _ => return Err(FormError::NoActiveForm),
        };
        form.validate()?;

        let form = form.clone();
        let result = match &form.mode {
            FormMode::Create { landmark_id } => self
                .store
                .add_entry(landmark_id, form.to_draft())
                .map_err(FormError::from),
            FormMode::Edit { entry_id } => {
                match self.store.update_entry(entry_id, form.to_patch()) {
                    Ok(UpdateOutcome::Updated(entry)) => Ok(entry),
                    Ok(UpdateOutcome::NotFound) => {
                        Err(FormError::EntryNotFound(entry_id.clone()))
                    }
                    Err(err) => Err(FormError::from(err)),
                }
            }
        };

        if let Ok(entry) = &result {
            self.store.select_landmark(entry.landmark_id.clone());
            info!(
                "event=page_save module=page status=ok entry_id={} mode={}",
                entry.id,
                mode_name(&form.mode)
            );
        }
        self.modal = self.pavilion_of_selection();
        result
    }

    /// Deletes `entry_id` and closes a form that was editing it.
    pub fn delete_entry(&mut self, entry_id: &str) -> StoreResult<DeleteOutcome> {
        let editing_deleted = matches!(
            &self.modal,
            ActiveModal::EntryForm(EntryForm {
                mode: FormMode::Edit { entry_id: editing },
                ..
            }) if editing == entry_id
        );
        if editing_deleted {
            self.modal = self.pavilion_of_selection();
        }
        self.store.delete_entry(entry_id)
    }

    /// Entry id edited by the open form, if it is an edit form.
    pub fn editing_entry(&self) -> Option<&EntryId> {
        match &self.modal {
            ActiveModal::EntryForm(EntryForm {
                mode: FormMode::Edit { entry_id },
                ..
            }) => Some(entry_id),
            _ => None,
        }
    }

    fn pavilion_of_selection(&self) -> ActiveModal {
        match self.store.selected_landmark() {
            Some(landmark_id) => ActiveModal::Pavilion(landmark_id.to_string()),
            None => ActiveModal::Closed,
        }
    }
}

fn mode_name(mode: &FormMode) -> &'static str {
    match mode {
        FormMode::Create { .. } => "create",
        FormMode::Edit { .. } => "edit",
    }
}
