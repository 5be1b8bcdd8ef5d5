//! SQLite-backed persistence slot.
//!
//! # Responsibility
//! - Open and configure SQLite connections for durable slot storage.
//! - Apply schema migrations in deterministic order.
//! - Implement `StoragePort` over the `storage_slots` table.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Slot reads/writes require a fully migrated connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod slot_storage;

pub use open::{open_db, open_db_in_memory};
pub use slot_storage::SqliteSlotStorage;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection was not opened through `open_db*` and lacks the schema.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
