use resume_core::db::migrations::{latest_version, schema_version};
use resume_core::db::{open_db, open_db_in_memory, DbError};
use resume_core::storage::KvError;
use resume_core::{
    KeyValueStore, ResumeData, ResumeStore, SqliteKeyValueStore, StorageErrorCode,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(SqliteKeyValueStore::try_new(&conn).is_ok());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        DbError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn kv_items_replace_and_remove() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(kv.get_item("k").unwrap(), None);
    kv.set_item("k", "one").unwrap();
    kv.set_item("k", "two").unwrap();
    assert_eq!(kv.get_item("k").unwrap().as_deref(), Some("two"));

    kv.remove_item("k").unwrap();
    kv.remove_item("k").unwrap();
    assert_eq!(kv.get_item("k").unwrap(), None);
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumes.db");

    let created = {
        let conn = open_db(&path).unwrap();
        let store = ResumeStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
        store.create_entry_from_data(ResumeData::default()).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let store = ResumeStore::new(SqliteKeyValueStore::try_new(&conn).unwrap());
    assert_eq!(store.get_resume_by_id(&created.id).unwrap(), Some(created));
}

#[test]
fn full_database_maps_to_quota_exceeded() {
    let conn = open_db_in_memory().unwrap();
    let _: i64 = conn
        .query_row("PRAGMA max_page_count = 1;", [], |row| row.get(0))
        .unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();

    let large = "x".repeat(512 * 1024);
    let err = kv.set_item("big", &large).unwrap_err();
    assert!(matches!(err, KvError::Rejected { .. }));
    assert!(err.is_quota_signal());

    let mut data = ResumeData::default();
    data.title = large;
    let store = ResumeStore::new(kv);
    let err = store.create_entry_from_data(data).unwrap_err();
    assert_eq!(err.code, StorageErrorCode::QuotaExceeded);
}
