// src/db/connection.rs
//! Opening and initialising SQLite with runtime parameters.

use std::{fs, path::Path};
use rusqlite::Connection;
use crate::config::DatabaseConfig;

pub const SCHEMA_SQL: &str = include_str!("../../resources/schema.sql");

/// Column order of `users_db` as created by `SCHEMA_SQL`.
pub const USERS_COLUMNS: [&str; 6] = ["id", "name", "country", "email", "date_of_birthday", "number"];

/// Open `path` and apply the durability/performance pragmas.
fn open_db_connection(path: &Path, cfg: &DatabaseConfig) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(cfg.busy_timeout)?;

    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        log::warn!("journal_mode is {} for {}, WAL not available", mode, path.display());
    }
    conn.pragma_update(None, "synchronous", cfg.synchronous.as_str())?;
    conn.pragma_update(None, "cache_size", cfg.cache_size)?;
    Ok(conn)
}

/// Open the database at `cfg.path`, creating file, parent directory and
/// table as needed. Safe to call against an existing database.
pub fn init_database(cfg: &DatabaseConfig) -> rusqlite::Result<Connection> {
    let path = cfg.path.as_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            log::warn!("Cannot create {}: {}", parent.display(), e);
        }
    }

    let conn = open_db_connection(path, cfg)?;
    conn.execute_batch(SCHEMA_SQL)?;
    check_schema(&conn)?;
    log::info!("Database ready at {}", path.display());
    Ok(conn)
}

/// An existing `users_db` created by something else must match our layout.
fn check_schema(conn: &Connection) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('users_db') ORDER BY cid")?;
    let found = stmt
        .query_map([], |r| r.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if found.iter().map(String::as_str).eq(USERS_COLUMNS) {
        return Ok(());
    }
    Err(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_SCHEMA),
        Some(format!(
            "users_db has columns [{}], expected [{}]",
            found.join(", "),
            USERS_COLUMNS.join(", ")
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_in(dir: &Path) -> DatabaseConfig {
        DatabaseConfig { path: dir.join("nested").join("users.db"), ..DatabaseConfig::default() }
    }

    #[test]
    fn pragmas_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let conn = init_database(&cfg).unwrap();

        let mode: String = conn.query_row("PRAGMA journal_mode", [], |r| r.get(0)).unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
        let cache: i64 = conn.query_row("PRAGMA cache_size", [], |r| r.get(0)).unwrap();
        assert_eq!(cache, cfg.cache_size);
        // NORMAL == 1
        let sync: i64 = conn.query_row("PRAGMA synchronous", [], |r| r.get(0)).unwrap();
        assert_eq!(sync, 1);
    }

    #[test]
    fn schema_has_expected_columns() {
        let dir = tempfile::tempdir().unwrap();
        let conn = init_database(&cfg_in(dir.path())).unwrap();

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('users_db') ORDER BY cid").unwrap();
        let cols: Vec<String> = stmt
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(cols, USERS_COLUMNS);
    }

    #[test]
    fn foreign_users_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        std::fs::create_dir_all(cfg.path.parent().unwrap()).unwrap();
        Connection::open(&cfg.path)
            .unwrap()
            .execute_batch("CREATE TABLE users_db (id INTEGER PRIMARY KEY, foo TEXT);")
            .unwrap();

        let err = init_database(&cfg).unwrap_err();
        assert!(err.to_string().contains("foo"), "{err}");
    }
}
