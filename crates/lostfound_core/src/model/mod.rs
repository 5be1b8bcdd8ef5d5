//! Domain model for lost-and-found reports.
//!
//! # Responsibility
//! - Define the canonical item record persisted in the storage slot.
//! - Define the unvalidated draft shape collected from report forms.
//!
//! # Invariants
//! - Every record is identified by a stable `ItemId`.
//! - Records are never deleted; `resolved` is the only mutable field.

pub mod draft;
pub mod item;
