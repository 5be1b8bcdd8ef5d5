//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and record store mutations into use-case APIs.
//! - Keep FFI/CLI surfaces decoupled from storage details.

pub mod clock;
pub mod item_service;
