//! Memory store over a key-value backend.
//!
//! # Responsibility
//! - Hydrate the entry collection from the user-scoped storage key.
//! - Provide create/update/delete, lookup-by-landmark and search.
//! - Write the full collection back as one JSON array on every mutation.
//!
//! # Invariants
//! - Entry ids are unique within the collection.
//! - After a mutation returns `Ok`, the persisted snapshot equals the
//!   in-memory collection.
//! - A failed write keeps the in-memory change; the next successful write
//!   brings storage back in sync.
//! - Hydration keeps every decodable record and the first copy of each id.
//! - Entry contents are never logged; only ids, counts and keys.

use crate::catalog::LandmarkCatalog;
use crate::config::CoreConfig;
use crate::kv::{KeyValueStore, KvError};
use crate::model::entry::{Entry, EntryDraft, EntryId, EntryPatch};
use crate::model::landmark::{Category, Landmark, LandmarkId};
use crate::search::entry_search::search_entries;
use chrono::{SubsecRound, Utc};
use log::{error, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while persisting the entry collection.
#[derive(Debug)]
pub enum StoreError {
    /// Collection could not be encoded as JSON.
    Serialize(serde_json::Error),
    /// Backend rejected the write or remove under `key`.
    Persist { key: String, source: KvError },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to encode entries: {err}"),
            Self::Persist { key, source } => {
                write!(f, "failed to persist entries under `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Persist { source, .. } => Some(source),
        }
    }
}

/// Result of [`MemoryStore::update_entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The entry after the patch was merged.
    Updated(Entry),
    /// No entry with the requested id; collection unchanged.
    NotFound,
}

/// Result of [`MemoryStore::delete_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// No entry with the requested id; collection unchanged.
    NotFound,
}

/// One user's entry collection plus the currently selected landmark.
pub struct MemoryStore<S: KeyValueStore> {
    backend: S,
    catalog: LandmarkCatalog,
    storage_key: String,
    entries: Vec<Entry>,
    selected_landmark: Option<LandmarkId>,
}

impl<S: KeyValueStore> MemoryStore<S> {
    /// Opens the store for `user_id` and hydrates it from `backend`.
    ///
    /// Absent, unreadable or malformed snapshots yield an empty collection
    /// and a warning log; this never fails. The selected landmark starts at
    /// the catalog's first landmark.
    pub fn open(
        backend: S,
        catalog: LandmarkCatalog,
        config: &CoreConfig,
        user_id: Option<&str>,
    ) -> Self {
        let storage_key = config.storage_key(user_id);
        let mut store = Self {
            backend,
            catalog,
            storage_key,
            entries: Vec::new(),
            selected_landmark: None,
        };
        store.reload();
        if store.selected_landmark.is_none() {
            store.selected_landmark = Some(store.catalog.first().id.clone());
        }

        info!(
            "event=memory_open module=store status=ok key={} entries={}",
            store.storage_key,
            store.entries.len()
        );
        store
    }

    /// Replaces the in-memory collection with the persisted snapshot.
    ///
    /// Records that fail to decode, and later records repeating an earlier
    /// id, are skipped with a warning; the remaining entries are kept.
    pub fn reload(&mut self) {
        self.entries = match self.backend.get(&self.storage_key) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
                Ok(records) => decode_snapshot(&self.storage_key, records),
                Err(err) => {
                    warn!(
                        "event=memory_hydrate module=store status=degraded key={} reason=parse_error error={}",
                        self.storage_key, err
                    );
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(
                    "event=memory_hydrate module=store status=degraded key={} reason=read_error error={}",
                    self.storage_key, err
                );
                Vec::new()
            }
        };
    }

    /// Creates an entry under `landmark_id`, prepends it and persists.
    ///
    /// The draft is not validated here; form-level checks belong to the
    /// caller. The category defaults to the catalog landmark's category, or
    /// [`Category::Other`] for ids missing from the catalog. Selects
    /// `landmark_id`.
    pub fn add_entry(&mut self, landmark_id: &str, draft: EntryDraft) -> StoreResult<Entry> {
        let landmark_category = self
            .catalog
            .lookup(landmark_id)
            .map_or(Category::Other, |landmark| landmark.category);
        let entry = Entry::from_draft(
            self.generate_id(),
            landmark_id,
            landmark_category,
            draft,
            Utc::now().trunc_subsecs(3),
        );

        self.entries.insert(0, entry.clone());
        self.selected_landmark = Some(landmark_id.to_string());
        info!(
            "event=entry_add module=store status=ok entry_id={} landmark_id={} entries={}",
            entry.id,
            landmark_id,
            self.entries.len()
        );

        self.persist()?;
        Ok(entry)
    }

    /// Merges `patch` into the entry with `entry_id`, then persists.
    ///
    /// A missing id leaves the collection unchanged and reports
    /// [`UpdateOutcome::NotFound`]; the collection is still written back.
    pub fn update_entry(
        &mut self,
        entry_id: &str,
        patch: EntryPatch,
    ) -> StoreResult<UpdateOutcome> {
        let outcome = match self.entries.iter_mut().find(|entry| entry.id == entry_id) {
            Some(entry) => {
                entry.apply_patch(patch);
                UpdateOutcome::Updated(entry.clone())
            }
            None => UpdateOutcome::NotFound,
        };

        info!(
            "event=entry_update module=store status={} entry_id={}",
            outcome_status(matches!(outcome, UpdateOutcome::Updated(_))),
            entry_id
        );

        self.persist()?;
        Ok(outcome)
    }

    /// Removes the entry with `entry_id` when present, then persists.
    pub fn delete_entry(&mut self, entry_id: &str) -> StoreResult<DeleteOutcome> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != entry_id);
        let outcome = if self.entries.len() < before {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        };

        info!(
            "event=entry_delete module=store status={} entry_id={} entries={}",
            outcome_status(outcome == DeleteOutcome::Deleted),
            entry_id,
            self.entries.len()
        );

        self.persist()?;
        Ok(outcome)
    }

    /// Drops every entry and removes the storage key.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        self.backend
            .remove(&self.storage_key)
            .map_err(|source| self.persist_failed(source))?;
        info!(
            "event=memory_clear module=store status=ok key={}",
            self.storage_key
        );
        Ok(())
    }

    /// Entries attached to `landmark_id`, in collection order.
    pub fn entries_by_landmark<'a>(
        &'a self,
        landmark_id: &'a str,
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.landmark_id == landmark_id)
    }

    /// Entries matching `query` and `tag_filter`; see [`search_entries`].
    pub fn search_entries(&self, query: &str, tag_filter: &str) -> Vec<&Entry> {
        search_entries(&self.entries, query, tag_filter)
    }

    /// Full collection, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == entry_id)
    }

    /// The `limit` most recently created entries.
    pub fn recent_entries(&self, limit: usize) -> &[Entry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Entry count per landmark id; landmarks without entries are absent.
    pub fn landmark_entry_counts(&self) -> BTreeMap<LandmarkId, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.landmark_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct tags across the collection.
    ///
    /// Deduplicated case-insensitively keeping the first spelling seen, and
    /// sorted case-insensitively.
    pub fn all_tags(&self) -> Vec<String> {
        let mut unique = BTreeMap::new();
        for tag in self.entries.iter().flat_map(|entry| entry.tags.iter()) {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                continue;
            }
            unique
                .entry(trimmed.to_lowercase())
                .or_insert_with(|| trimmed.to_string());
        }
        unique.into_values().collect()
    }

    pub fn select_landmark(&mut self, landmark_id: impl Into<LandmarkId>) {
        self.selected_landmark = Some(landmark_id.into());
    }

    pub fn selected_landmark(&self) -> Option<&str> {
        self.selected_landmark.as_deref()
    }

    /// Catalog record of the selected landmark, when it exists in the catalog.
    pub fn selected_landmark_details(&self) -> Option<&Landmark> {
        self.selected_landmark
            .as_deref()
            .and_then(|id| self.catalog.lookup(id))
    }

    pub fn catalog(&self) -> &LandmarkCatalog {
        &self.catalog
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Ends the session and hands the backend back to the caller.
    pub fn into_backend(self) -> S {
        info!(
            "event=memory_close module=store status=ok key={} entries={}",
            self.storage_key,
            self.entries.len()
        );
        self.backend
    }

    fn persist(&mut self) -> StoreResult<()> {
        let snapshot = serde_json::to_string(&self.entries).map_err(StoreError::Serialize)?;
        self.backend
            .set(&self.storage_key, &snapshot)
            .map_err(|source| self.persist_failed(source))
    }

    fn persist_failed(&self, source: KvError) -> StoreError {
        error!(
            "event=memory_persist module=store status=error key={} entries={} error={}",
            self.storage_key,
            self.entries.len(),
            source
        );
        StoreError::Persist {
            key: self.storage_key.clone(),
            source,
        }
    }

    fn generate_id(&self) -> EntryId {
        loop {
            let candidate = Uuid::new_v4().to_string();
            if self.entry(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

/// Converts snapshot records one by one, keeping the first of each id.
fn decode_snapshot(storage_key: &str, records: Vec<serde_json::Value>) -> Vec<Entry> {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(total);
    let mut skipped_invalid = 0usize;
    let mut skipped_duplicate = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        let entry = match serde_json::from_value::<Entry>(record) {
            Ok(entry) => entry,
            Err(err) => {
                skipped_invalid += 1;
                warn!(
                    "event=memory_hydrate module=store status=degraded key={storage_key} reason=invalid_record index={index} error={err}"
                );
                continue;
            }
        };
        if !seen.insert(entry.id.clone()) {
            skipped_duplicate += 1;
            warn!(
                "event=memory_hydrate module=store status=degraded key={storage_key} reason=duplicate_id index={index} entry_id={}",
                entry.id
            );
            continue;
        }
        entries.push(entry);
    }

    if skipped_invalid > 0 || skipped_duplicate > 0 {
        warn!(
            "event=memory_hydrate module=store status=partial key={storage_key} records={total} kept={} skipped_invalid={skipped_invalid} skipped_duplicate={skipped_duplicate}",
            entries.len()
        );
    }
    entries
}

fn outcome_status(found: bool) -> &'static str {
    if found {
        "ok"
    } else {
        "not_found"
    }
}
