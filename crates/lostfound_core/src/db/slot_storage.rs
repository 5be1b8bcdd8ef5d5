//! `StoragePort` implementation over the `storage_slots` table.

use super::migrations::{current_version, latest_version};
use super::{DbError, DbResult};
use crate::store::port::{StoragePort, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed key-value slots.
pub struct SqliteSlotStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStorage<'conn> {
    /// Wraps a connection opened through `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `DbError::UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        let actual_version = current_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(DbError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Deletes one slot. Returns whether a row existed.
    pub fn remove(&self, key: &str) -> DbResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM storage_slots WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }

    /// Lists stored slot keys in ascending order.
    pub fn keys(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM storage_slots ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl StoragePort for SqliteSlotStorage<'_> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO storage_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
