//! Record store and persistence port.
//!
//! # Responsibility
//! - Hold the authoritative in-memory item sequence for a session.
//! - Mirror every change into one key-value slot as a full JSON snapshot.
//!
//! # Invariants
//! - Store order is newest-first.
//! - Ids are unique within the store.
//! - Loading never fails; unreadable snapshots fall back to seed data.

pub mod port;
pub mod record_store;
pub mod seed;

pub use port::{MemoryStorage, StorageError, StoragePort, StorageResult};
pub use record_store::{
    decode_snapshot, encode_snapshot, LoadSource, RecordStore, SeedReason, SnapshotError,
};
pub use seed::seed_items;
