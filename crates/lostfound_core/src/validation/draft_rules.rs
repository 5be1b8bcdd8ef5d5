//! Field rules for report drafts.

use crate::model::draft::{DraftField, ItemDraft};
use crate::model::item::ItemStatus;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("valid phone regex"));

/// Per-field validation messages. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<DraftField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Iterates errors in form order (name, description, date, ...).
    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Typed fields extracted from a draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub contact_info: String,
    pub status: ItemStatus,
}

/// Checks every draft field and returns all applicable errors.
///
/// `today` bounds the incident date; a date after it is rejected.
pub fn validate_draft(draft: &ItemDraft, today: NaiveDate) -> FieldErrors {
    match parse_draft(draft, today) {
        Ok(_) => FieldErrors::new(),
        Err(errors) => errors,
    }
}

/// Validates a draft and, when clean, returns its typed fields.
///
/// Text fields are carried over verbatim; only the emptiness check trims.
pub fn parse_draft(draft: &ItemDraft, today: NaiveDate) -> Result<ValidDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    require_text(&mut errors, DraftField::Name, &draft.name, "Item name is required");
    require_text(
        &mut errors,
        DraftField::Description,
        &draft.description,
        "Description is required",
    );
    require_text(
        &mut errors,
        DraftField::Location,
        &draft.location,
        "Location is required",
    );

    let date = check_date(&mut errors, &draft.date, today);
    let status = check_status(&mut errors, &draft.status);
    check_contact(&mut errors, &draft.contact_info);

    match (date, status) {
        (Some(date), Some(status)) if errors.is_empty() => Ok(ValidDraft {
            name: draft.name.clone(),
            description: draft.description.clone(),
            date,
            location: draft.location.clone(),
            contact_info: draft.contact_info.clone(),
            status,
        }),
        _ => Err(errors),
    }
}

/// Returns whether `value` looks like an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Returns whether `value` looks like a phone number with enough digits.
pub fn is_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Returns whether a contact string is an email address or a phone number.
pub fn is_contact_valid(value: &str) -> bool {
    is_email(value) || is_phone(value)
}

fn require_text(errors: &mut FieldErrors, field: DraftField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn check_date(errors: &mut FieldErrors, raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    if raw.is_empty() {
        errors.insert(DraftField::Date, "Date is required");
        return None;
    }

    let Ok(date) = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) else {
        errors.insert(
            DraftField::Date,
            "Date must be a valid calendar date (YYYY-MM-DD)",
        );
        return None;
    };

    if date > today {
        errors.insert(DraftField::Date, "Date cannot be in the future");
        return None;
    }

    Some(date)
}

fn check_status(errors: &mut FieldErrors, raw: &str) -> Option<ItemStatus> {
    if raw.is_empty() {
        errors.insert(DraftField::Status, "Status is required");
        return None;
    }

    match raw.parse::<ItemStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.insert(DraftField::Status, "Status must be lost or found");
            None
        }
    }
}

fn check_contact(errors: &mut FieldErrors, raw: &str) {
    if raw.trim().is_empty() {
        errors.insert(DraftField::ContactInfo, "Contact info is required");
    }

    // A whitespace-only value can still fall through here; the format message
    // then replaces the required one.
    if !raw.is_empty() && !is_contact_valid(raw) {
        errors.insert(
            DraftField::ContactInfo,
            "Please enter a valid email or phone number",
        );
    }
}
