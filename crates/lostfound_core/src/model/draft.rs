//! Unvalidated report input.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Raw report form input before validation.
///
/// All fields are free-form strings; `status` may be empty when the reporter
/// has not picked one yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    /// Incident date as typed, expected `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    pub contact_info: String,
    pub status: String,
}

/// Draft field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Name,
    Description,
    Date,
    Location,
    ContactInfo,
    Status,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        Self::Name,
        Self::Description,
        Self::Date,
        Self::Location,
        Self::ContactInfo,
        Self::Status,
    ];

    /// Wire name matching the serialized draft key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Date => "date",
            Self::Location => "location",
            Self::ContactInfo => "contactInfo",
            Self::Status => "status",
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
