//! Integration tests for the SQLite WAL storage layer.
//!
//! Key responsibilities:
//! - Verify batch atomicity when SQLite rejects a row mid-batch.
//! - Check schema creation is idempotent and data survives a reopen.
//! - Classify lock contention as transient and leave no partial rows.
//! - Reject unreadable database files at open time.

use std::{fs, path::Path, time::Duration};

use chrono::NaiveDate;
use rusqlite::Connection;

use ingestor::{
    config::DatabaseConfig,
    db::{SqliteSession, StorageError, StorageGateway},
    generator::Record,
};

fn record(name: &str) -> Record {
    Record {
        name: name.into(),
        country: "Norway".into(),
        email: format!("{name}@example.org"),
        date_of_birth: NaiveDate::from_ymd_opt(1975, 11, 3).unwrap(),
        phone_number: "+1-555-010-0000".into(),
    }
}

fn batch(names: &[&str]) -> Vec<Record> {
    names.iter().map(|n| record(n)).collect()
}

fn db_config(dir: &Path) -> DatabaseConfig {
    DatabaseConfig { path: dir.join("data.db"), ..DatabaseConfig::default() }
}

fn count_rows(path: &Path) -> i64 {
    let conn = Connection::open(path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM users_db", [], |r| r.get(0)).unwrap()
}

#[test]
fn rejected_row_leaves_no_trace_of_its_batch() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = db_config(dir.path());
    let mut session = SqliteSession::open(&cfg).unwrap();
    session
        .connection()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_r5 BEFORE INSERT ON users_db \
             WHEN NEW.name = 'r5' BEGIN SELECT RAISE(ABORT, 'r5 rejected'); END;",
        )
        .unwrap();

    assert_eq!(session.insert_batch(&batch(&["r1", "r2", "r3"])).unwrap(), 3);
    let err = session.insert_batch(&batch(&["r4", "r5", "r6"])).unwrap_err();
    assert!(!err.is_transient(), "{err:?}");
    session.close().unwrap();

    let conn = Connection::open(&cfg.path).unwrap();
    let mut stmt = conn.prepare("SELECT name FROM users_db ORDER BY id").unwrap();
    let names: Vec<String> = stmt.query_map([], |r| r.get(0)).unwrap().map(Result::unwrap).collect();
    assert_eq!(names, ["r1", "r2", "r3"]);
}

#[test]
fn reopening_keeps_table_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = db_config(dir.path());

    let mut first = SqliteSession::open(&cfg).unwrap();
    first.insert_batch(&batch(&["a", "b"])).unwrap();
    first.close().unwrap();

    let mut second = SqliteSession::open(&cfg).unwrap();
    assert_eq!(second.row_count().unwrap(), 2);
    second.insert_batch(&batch(&["c"])).unwrap();

    let tables: i64 = second
        .connection()
        .unwrap()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users_db'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);

    // ids keep growing across sessions
    let max_id: i64 = second
        .connection()
        .unwrap()
        .query_row("SELECT MAX(id) FROM users_db WHERE name = 'c'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(max_id, 3);
    second.close().unwrap();
}

#[test]
fn lock_contention_is_transient_and_rolled_back() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = DatabaseConfig {
        busy_timeout: Duration::from_millis(20),
        max_retries: 2,
        ..db_config(dir.path())
    };
    let mut session = SqliteSession::open(&cfg).unwrap();

    let blocker = Connection::open(&cfg.path).unwrap();
    blocker.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let err = session.insert_batch(&batch(&["x", "y"])).unwrap_err();
    assert!(matches!(err, StorageError::Transient(_)), "{err:?}");

    blocker.execute_batch("ROLLBACK;").unwrap();
    assert_eq!(session.row_count().unwrap(), 0);

    // once the lock is gone the same session writes normally
    assert_eq!(session.insert_batch(&batch(&["x", "y"])).unwrap(), 2);
    session.close().unwrap();
    assert_eq!(count_rows(&cfg.path), 2);
}

#[test]
fn garbage_file_fails_at_open() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = db_config(dir.path());
    fs::write(&cfg.path, vec![0x42u8; 8192]).unwrap();

    match SqliteSession::open(&cfg) {
        Err(StorageError::Open { path, .. }) => assert_eq!(path, cfg.path),
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("opening a corrupt file must fail"),
    }
}

#[test]
fn mismatched_users_table_fails_at_open() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = db_config(dir.path());
    Connection::open(&cfg.path)
        .unwrap()
        .execute_batch("CREATE TABLE users_db (id INTEGER PRIMARY KEY, foo TEXT);")
        .unwrap();

    match SqliteSession::open(&cfg) {
        Err(StorageError::Open { path, source }) => {
            assert_eq!(path, cfg.path);
            assert!(source.to_string().contains("expected [id, name"), "{source}");
        }
        Err(other) => panic!("unexpected error: {other:?}"),
        Ok(_) => panic!("a users_db with foreign columns must be rejected"),
    }
}
