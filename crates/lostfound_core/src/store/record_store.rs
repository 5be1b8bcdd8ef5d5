//! Authoritative in-memory record sequence synchronized to a storage slot.
//!
//! # Responsibility
//! - Load the persisted snapshot once, falling back to seed records.
//! - Re-serialize the whole sequence after every mutation.
//!
//! # Invariants
//! - Ids are unique; `prepend` refuses a duplicate id.
//! - Only `resolved` changes on existing records.
//! - Persistence failures are logged and never roll back memory state.

use crate::model::item::{ItemId, ItemRecord};
use crate::store::port::StoragePort;
use crate::store::seed::seed_items;
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot codec failure.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    DuplicateId(ItemId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid snapshot json: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate item id in snapshot: {id}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Why the store started from seed data instead of the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    Absent,
    Empty,
    Unparseable,
    ReadFailed,
}

impl SeedReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Empty => "empty",
            Self::Unparseable => "unparseable",
            Self::ReadFailed => "read_failed",
        }
    }
}

/// Where the records of an opened store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Snapshot,
    Seed(SeedReason),
}

/// Serializes records to the slot's JSON array format.
pub fn encode_snapshot(items: &[ItemRecord]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(items)?)
}

/// Parses the slot's JSON array format, rejecting duplicate ids.
pub fn decode_snapshot(raw: &str) -> Result<Vec<ItemRecord>, SnapshotError> {
    let items: Vec<ItemRecord> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(SnapshotError::DuplicateId(item.id.clone()));
        }
    }
    Ok(items)
}

/// Newest-first item sequence bound to one storage slot.
pub struct RecordStore<S: StoragePort> {
    storage: S,
    slot_key: String,
    items: Vec<ItemRecord>,
    source: LoadSource,
}

impl<S: StoragePort> RecordStore<S> {
    /// Opens the store from `slot_key`.
    ///
    /// A missing, empty, unreadable or malformed snapshot is replaced by the
    /// seed records, which are persisted immediately. Never fails.
    pub fn open(storage: S, slot_key: impl Into<String>) -> Self {
        let slot_key = slot_key.into();
        let (items, source) = load_items(&storage, &slot_key);

        let store = Self {
            storage,
            slot_key,
            items,
            source,
        };

        if let LoadSource::Seed(reason) = store.source {
            info!(
                "event=store_open module=store status=seeded slot={} reason={} count={}",
                store.slot_key,
                reason.as_str(),
                store.items.len()
            );
            store.persist();
        } else {
            info!(
                "event=store_open module=store status=loaded slot={} count={}",
                store.slot_key,
                store.items.len()
            );
        }

        store
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts a record as the newest entry and persists.
    ///
    /// Returns `false` without changes when the id is already present.
    pub fn prepend(&mut self, item: ItemRecord) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.insert(0, item);
        self.persist();
        true
    }

    /// Sets the resolved flag on one record and persists.
    ///
    /// Returns whether a record with `id` exists. The slot is rewritten
    /// either way.
    pub fn set_resolved(&mut self, id: &str, resolved: bool) -> bool {
        let found = match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                if resolved {
                    item.resolve();
                } else {
                    item.unresolve();
                }
                true
            }
            None => false,
        };
        self.persist();
        found
    }

    /// Writes the full sequence to the slot; failures are logged only.
    pub fn persist(&self) {
        let encoded = match encode_snapshot(&self.items) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error slot={} error_code=encode_failed error={}",
                    self.slot_key, err
                );
                return;
            }
        };

        match self.storage.write(&self.slot_key, &encoded) {
            Ok(()) => info!(
                "event=store_persist module=store status=ok slot={} count={} bytes={}",
                self.slot_key,
                self.items.len(),
                encoded.len()
            ),
            Err(err) => error!(
                "event=store_persist module=store status=error slot={} error_code=write_failed error={}",
                self.slot_key, err
            ),
        }
    }
}

fn load_items<S: StoragePort>(storage: &S, slot_key: &str) -> (Vec<ItemRecord>, LoadSource) {
    let raw = match storage.read(slot_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (seed_items(), LoadSource::Seed(SeedReason::Absent)),
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback slot={} error_code=read_failed error={}",
                slot_key, err
            );
            return (seed_items(), LoadSource::Seed(SeedReason::ReadFailed));
        }
    };

    match decode_snapshot(&raw) {
        Ok(items) if items.is_empty() => (seed_items(), LoadSource::Seed(SeedReason::Empty)),
        Ok(items) => (items, LoadSource::Snapshot),
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback slot={} error_code=decode_failed error={}",
                slot_key, err
            );
            (seed_items(), LoadSource::Seed(SeedReason::Unparseable))
        }
    }
}
