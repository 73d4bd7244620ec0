//! User-scoped entry store.
//!
//! # Responsibility
//! - Own one user's entry collection and its selected landmark.
//! - Mirror the collection into key-value storage after every mutation.
//!
//! # Invariants
//! - New entries are prepended; updates and deletes keep relative order.
//! - Unreadable persisted snapshots degrade to an empty collection.

pub mod memory_store;
