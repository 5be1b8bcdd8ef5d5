use lostfound_core::db::migrations::latest_version;
use lostfound_core::{
    decode_snapshot, open_db, open_db_in_memory, DbError, ItemDraft, ItemService, LoadSource,
    RecordStore, SqliteSlotStorage, StoragePort, DEFAULT_SLOT_KEY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "storage_slots");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lostfound.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "storage_slots");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn slot_storage_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSlotStorage::try_new(&conn) {
        Err(DbError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("uninitialized connection must be rejected"),
    }
}

#[test]
fn read_write_overwrites_and_remove_clears() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::try_new(&conn).unwrap();

    assert_eq!(storage.read("slot").unwrap(), None);
    storage.write("slot", "[1]").unwrap();
    storage.write("slot", "[2]").unwrap();
    storage.write("other", "[]").unwrap();
    assert_eq!(storage.read("slot").unwrap().as_deref(), Some("[2]"));
    assert_eq!(storage.keys().unwrap(), vec!["other", "slot"]);

    assert!(storage.remove("slot").unwrap());
    assert!(!storage.remove("slot").unwrap());
    assert_eq!(storage.read("slot").unwrap(), None);
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    let created_id = {
        let conn = open_db(&path).unwrap();
        let storage = SqliteSlotStorage::try_new(&conn).unwrap();
        let mut service = ItemService::open(storage, DEFAULT_SLOT_KEY);
        service.resolve("seed-2");
        let created = service
            .create(&ItemDraft {
                name: "Scarf".to_string(),
                description: "Red wool scarf".to_string(),
                date: "2024-02-14".to_string(),
                location: "Bus stop".to_string(),
                contact_info: "555 010 9999".to_string(),
                status: "found".to_string(),
            })
            .unwrap();
        created.id
    };

    let conn = open_db(&path).unwrap();
    let storage = SqliteSlotStorage::try_new(&conn).unwrap();
    let raw = storage.read(DEFAULT_SLOT_KEY).unwrap().unwrap();
    assert_eq!(decode_snapshot(&raw).unwrap().len(), 5);

    let store = RecordStore::open(storage, DEFAULT_SLOT_KEY);
    assert_eq!(store.load_source(), LoadSource::Snapshot);
    assert_eq!(store.items()[0].id, created_id);
    assert!(store.get("seed-2").unwrap().resolved);
}

#[test]
fn removed_slot_reseeds_on_next_open() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteSlotStorage::try_new(&conn).unwrap();
    {
        let mut store = RecordStore::open(&storage, DEFAULT_SLOT_KEY);
        store.set_resolved("seed-1", true);
    }

    storage.remove(DEFAULT_SLOT_KEY).unwrap();
    let store = RecordStore::open(&storage, DEFAULT_SLOT_KEY);
    assert!(matches!(store.load_source(), LoadSource::Seed(_)));
    assert!(!store.get("seed-1").unwrap().resolved);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
