//! Memory page controller.
//!
//! # Responsibility
//! - Hold UI state for the memory page: selection, modal, filters, search.
//! - Drive the create/edit form flow and validate it before touching the
//!   store.
//!
//! # Invariants
//! - The controller never mutates entries directly; every change goes
//!   through [`crate::MemoryStore`].
//! - A form that fails validation stays open with its input intact.

pub mod controller;
pub mod form;
