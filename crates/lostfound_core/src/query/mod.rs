//! Browse-side query entry points.
//!
//! # Responsibility
//! - Filter, search and sort item records for rendering.
//! - Derive dashboard counts from the full record set.
//!
//! # Invariants
//! - Queries never mutate their input.
//! - Sorting is stable; equal keys keep store order.

pub mod engine;
