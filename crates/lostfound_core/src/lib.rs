//! Core domain logic for the campus lost-and-found board.
//! This crate is the single source of truth for report invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{StoreConfig, DEFAULT_SLOT_KEY};
pub use db::{open_db, open_db_in_memory, DbError, SqliteSlotStorage};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::draft::{DraftField, ItemDraft};
pub use model::item::{generate_item_id, ContactKind, ItemId, ItemRecord, ItemStatus};
pub use query::engine::{
    count_items, run_query, ItemCounts, ItemFilter, ItemQuery, SortKey, SortOrder,
};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::item_service::{ItemService, ItemServiceError};
pub use store::{
    decode_snapshot, encode_snapshot, seed_items, LoadSource, MemoryStorage, RecordStore,
    SeedReason, SnapshotError, StorageError, StoragePort, StorageResult,
};
pub use validation::{validate_draft, FieldErrors};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
