//! Key-value persistence port.
//!
//! # Responsibility
//! - Abstract the host storage API (`read(key)`, `write(key, value)`).
//! - Provide an in-memory implementation for tests and ephemeral sessions.

use crate::db::DbError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the operation for a non-database reason.
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Host storage contract: one string value per key.
pub trait StoragePort {
    /// Returns the stored value, or `None` when the key was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: StoragePort + ?Sized> StoragePort for &T {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

/// Process-local storage backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with one slot pre-populated.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.slots.borrow_mut().insert(key.into(), value.into());
        storage
    }

    /// Returns a copy of the raw stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
