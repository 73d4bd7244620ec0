//! Memory map domain model.
//!
//! # Responsibility
//! - Define the landmark reference shape and the mutable entry record.
//! - Provide the explicit entry factory and patch-merge rules.
//!
//! # Invariants
//! - Every entry is identified by an id unique within one user's collection.
//! - Landmarks are static and never mutated at runtime.

pub mod entry;
pub mod landmark;
