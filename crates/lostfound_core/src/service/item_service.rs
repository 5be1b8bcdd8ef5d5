//! Item lifecycle service.
//!
//! # Responsibility
//! - Turn validated drafts into new records at the head of the store.
//! - Toggle the resolved flag and expose the resulting snapshot.
//! - Serve list queries and dashboard counts.
//!
//! # Invariants
//! - Invalid drafts never reach the store.
//! - Every mutation leaves the slot holding the full current snapshot.
//! - No delete or edit path exists.

use crate::model::draft::ItemDraft;
use crate::model::item::{generate_item_id, ItemId, ItemRecord};
use crate::query::engine::{count_items, run_query, ItemCounts, ItemQuery};
use crate::service::clock::{Clock, SystemClock};
use crate::store::port::StoragePort;
use crate::store::record_store::RecordStore;
use crate::validation::{parse_draft, FieldErrors};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_ID_ATTEMPTS: usize = 3;

/// Service error for item use-cases.
#[derive(Debug)]
pub enum ItemServiceError {
    /// Draft failed one or more field rules.
    Validation(FieldErrors),
    /// Fresh ids kept colliding with existing records.
    IdCollision(ItemId),
}

impl Display for ItemServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid report: {errors}"),
            Self::IdCollision(id) => write!(f, "could not allocate a unique item id (last: {id})"),
        }
    }
}

impl Error for ItemServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::IdCollision(_) => None,
        }
    }
}

impl From<FieldErrors> for ItemServiceError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Lifecycle facade over a record store.
pub struct ItemService<S: StoragePort, C: Clock = SystemClock> {
    store: RecordStore<S>,
    clock: C,
}

impl<S: StoragePort> ItemService<S, SystemClock> {
    /// Opens the slot and uses wall-clock time.
    pub fn open(storage: S, slot_key: impl Into<String>) -> Self {
        Self::with_clock(storage, slot_key, SystemClock)
    }
}

impl<S: StoragePort, C: Clock> ItemService<S, C> {
    pub fn with_clock(storage: S, slot_key: impl Into<String>, clock: C) -> Self {
        Self::from_store(RecordStore::open(storage, slot_key), clock)
    }

    pub fn from_store(store: RecordStore<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Validates a draft and records it as the newest item.
    ///
    /// # Contract
    /// - Returns every field error at once; the store is untouched on error.
    /// - New records start unresolved with `date_created = clock.now()`.
    /// - Text fields are stored exactly as submitted.
    pub fn create(&mut self, draft: &ItemDraft) -> Result<ItemRecord, ItemServiceError> {
        let valid = match parse_draft(draft, self.clock.today()) {
            Ok(valid) => valid,
            Err(errors) => {
                let fields = errors
                    .iter()
                    .map(|(field, _)| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                info!("event=item_create module=service status=rejected fields={fields}");
                return Err(errors.into());
            }
        };

        let mut record = ItemRecord {
            id: generate_item_id(),
            name: valid.name,
            description: valid.description,
            date: valid.date,
            location: valid.location,
            contact_info: valid.contact_info,
            status: valid.status,
            resolved: false,
            date_created: self.clock.now(),
        };

        for _ in 0..MAX_ID_ATTEMPTS {
            if self.store.prepend(record.clone()) {
                info!(
                    "event=item_create module=service status=ok id={} item_status={}",
                    record.id, record.status
                );
                return Ok(record);
            }
            record.id = generate_item_id();
        }

        Err(ItemServiceError::IdCollision(record.id))
    }

    /// Marks one item resolved. Unknown ids are ignored.
    pub fn resolve(&mut self, id: &str) -> &[ItemRecord] {
        self.set_resolved(id, true)
    }

    /// Reopens one resolved item. Unknown ids are ignored.
    pub fn unresolve(&mut self, id: &str) -> &[ItemRecord] {
        self.set_resolved(id, false)
    }

    pub fn get(&self, id: &str) -> Option<&ItemRecord> {
        self.store.get(id)
    }

    /// Current records, newest first.
    pub fn snapshot(&self) -> &[ItemRecord] {
        self.store.items()
    }

    /// Records to render for the given list parameters.
    pub fn query(&self, query: &ItemQuery) -> Vec<ItemRecord> {
        run_query(self.store.items(), query)
    }

    pub fn counts(&self) -> ItemCounts {
        count_items(self.store.items())
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    fn set_resolved(&mut self, id: &str, resolved: bool) -> &[ItemRecord] {
        let found = self.store.set_resolved(id, resolved);
        info!(
            "event=item_resolve module=service status={} id={} resolved={}",
            if found { "ok" } else { "not_found" },
            id,
            resolved
        );
        self.store.items()
    }
}
