//! Entry search entry points.
//!
//! # Responsibility
//! - Filter an entry collection by free-text query and exact tag.
//! - Keep matching rules in one place for the store and page controller.

pub mod entry_search;
