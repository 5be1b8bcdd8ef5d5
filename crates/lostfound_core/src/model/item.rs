//! Item record domain model.
//!
//! # Responsibility
//! - Define the record shared by the store, query engine and surfaces.
//! - Provide resolve/unresolve helpers and contact link derivation.
//!
//! # Invariants
//! - `id`, `status` and `date_created` never change after creation.
//! - Wire names are camelCase so existing browser snapshots load unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque record identifier.
///
/// Generated ids are hyphenated UUIDv7 strings; seed records use `seed-N`.
pub type ItemId = String;

/// Whether an item was reported as lost or as found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Lost,
    Found,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }

    /// Human label used in surface messages ("Lost" / "Found").
    pub fn label(self) -> &'static str {
        match self {
            Self::Lost => "Lost",
            Self::Found => "Found",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lost" => Ok(Self::Lost),
            "found" => Ok(Self::Found),
            other => Err(format!("unknown item status `{other}`; expected lost|found")),
        }
    }
}

/// How the reporter can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
}

/// One lost-or-found report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Incident date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub location: String,
    pub contact_info: String,
    pub status: ItemStatus,
    #[serde(default)]
    pub resolved: bool,
    /// Creation instant, serialized as RFC 3339.
    pub date_created: DateTime<Utc>,
}

impl ItemRecord {
    /// Marks the item as reunited with its owner.
    pub fn resolve(&mut self) {
        self.resolved = true;
    }

    /// Reopens a resolved item.
    pub fn unresolve(&mut self) {
        self.resolved = false;
    }

    /// Returns whether the item still needs attention.
    pub fn is_open(&self) -> bool {
        !self.resolved
    }

    pub fn contact_kind(&self) -> ContactKind {
        if self.contact_info.contains('@') {
            ContactKind::Email
        } else {
            ContactKind::Phone
        }
    }

    /// Returns a `mailto:` or `tel:` link for the contact field.
    ///
    /// Phone links drop spaces, hyphens and parentheses.
    pub fn contact_link(&self) -> String {
        match self.contact_kind() {
            ContactKind::Email => format!("mailto:{}", self.contact_info),
            ContactKind::Phone => {
                let dialable: String = self
                    .contact_info
                    .chars()
                    .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
                    .collect();
                format!("tel:{dialable}")
            }
        }
    }
}

/// Generates a fresh record id.
///
/// UUIDv7 combines a millisecond timestamp with random bits, so ids sort
/// roughly by creation time and collide only with negligible probability.
pub fn generate_item_id() -> ItemId {
    Uuid::now_v7().hyphenated().to_string()
}
