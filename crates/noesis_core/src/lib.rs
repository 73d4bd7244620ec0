//! Core data layer for the NOESIS memory map.
//! This crate is the single source of truth for entry and landmark invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod page;
pub mod search;
pub mod store;

pub use catalog::{CatalogError, LandmarkCatalog};
pub use config::{ConfigError, CoreConfig};
pub use kv::{InMemoryKvStore, KeyValueStore, KvError, KvResult, SqliteKvStore};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::entry::{Entry, EntryDraft, EntryId, EntryPatch, EntryType};
pub use model::landmark::{Category, Landmark, LandmarkId, MapPosition};
pub use page::controller::{ActiveModal, LandmarkTile, MemoryPage};
pub use page::form::{EntryForm, FormError, FormMode};
pub use search::entry_search::{search_entries, EntrySearch};
pub use store::memory_store::{
    DeleteOutcome, MemoryStore, StoreError, StoreResult, UpdateOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
