//! Report form validation.
//!
//! # Responsibility
//! - Map an `ItemDraft` to per-field error messages.
//! - Convert a clean draft into typed record fields.
//!
//! # Invariants
//! - Every rule runs; errors are never short-circuited.
//! - Validation is pure: same draft and `today` always give the same errors.

pub mod draft_rules;

pub use draft_rules::{
    is_contact_valid, is_email, is_phone, parse_draft, validate_draft, FieldErrors, ValidDraft,
};
