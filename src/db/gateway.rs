// src/db/gateway.rs

use rusqlite::{Connection, ErrorCode, Transaction};
use std::{path::PathBuf, thread::sleep, time::{Duration, Instant}};
use thiserror::Error;

use super::batch_inserts::BatchInsert;
use super::connection::init_database;
use crate::config::DatabaseConfig;
use crate::generator::Record;

/// The storage side of the ingestion loop: one session, one transaction per batch.
pub trait StorageGateway {
    /// Insert every record in one transaction. Either all rows are committed
    /// or none are visible.
    fn insert_batch(&mut self, records: &[Record]) -> Result<usize, StorageError>;

    /// Release the session. Calling it again is a no-op.
    fn close(&mut self) -> Result<(), StorageError>;

    fn is_closed(&self) -> bool;
}

#[derive(Debug, Error)]
pub enum StorageError {
    /// Schema, permission or corruption problem while opening.
    #[error("cannot open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// BUSY / LOCKED; the batch was rolled back and may succeed later.
    #[error("transient SQLite error: {0}")]
    Transient(#[source] rusqlite::Error),

    #[error("SQLite error: {0}")]
    Fatal(#[source] rusqlite::Error),

    #[error("database session is closed")]
    Closed,
}

impl StorageError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Transient(_))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => StorageError::Transient(e),
            _ => StorageError::Fatal(e),
        }
    }
}

/// SQLite-backed gateway owning a single connection.
pub struct SqliteSession {
    conn:        Option<Connection>,
    path:        PathBuf,
    max_retries: u32,
}

impl SqliteSession {
    /// Open (or create) the database, apply pragmas and make sure the table exists.
    pub fn open(cfg: &DatabaseConfig) -> Result<Self, StorageError> {
        let conn = init_database(cfg).map_err(|source| StorageError::Open {
            path: cfg.path.clone(),
            source,
        })?;
        Ok(SqliteSession {
            conn: Some(conn),
            path: cfg.path.clone(),
            max_retries: cfg.max_retries,
        })
    }

    /// Underlying connection while the session is open.
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    pub fn row_count(&self) -> Result<u64, StorageError> {
        let conn = self.conn.as_ref().ok_or(StorageError::Closed)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM users_db", [], |r| r.get(0))?;
        Ok(n as u64)
    }
}

impl StorageGateway for SqliteSession {
    fn insert_batch(&mut self, records: &[Record]) -> Result<usize, StorageError> {
        let max_retries = self.max_retries;
        let conn = self.conn.as_mut().ok_or(StorageError::Closed)?;
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            match insert_in_transaction(conn, records) {
                Ok(n) => {
                    metrics::histogram!("ingest_commit_seconds").record(start.elapsed().as_secs_f64());
                    return Ok(n);
                }
                Err(e) if e.is_transient() && attempts < max_retries => {
                    attempts += 1;
                    log::warn!("Batch rolled back ({}), retry {}/{}", e, attempts, max_retries);
                    sleep(Duration::from_millis(50 * u64::from(attempts)));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn close(&mut self) -> Result<(), StorageError> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        match conn.close() {
            Ok(()) => {
                log::info!("Database session closed ({})", self.path.display());
                Ok(())
            }
            // the connection handed back is dropped here, which releases it anyway
            Err((_conn, e)) => {
                log::warn!("Database session closed with error: {}", e);
                Err(StorageError::Fatal(e))
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.conn.is_none()
    }
}

impl Drop for SqliteSession {
    fn drop(&mut self) {
        if self.conn.is_some() {
            log::debug!("Closing database session on drop");
            let _ = self.close();
        }
    }
}

fn insert_in_transaction(conn: &mut Connection, records: &[Record]) -> Result<usize, StorageError> {
    let tx = conn.transaction()?;
    match write_all(&tx, records) {
        Ok(n) => {
            // a failed COMMIT leaves the transaction open; dropping it rolls back
            tx.commit()?;
            Ok(n)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback() {
                log::error!("Rollback failed: {}", rb);
            }
            Err(e.into())
        }
    }
}

fn write_all<T: BatchInsert<T>>(tx: &Transaction<'_>, records: &[T]) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare_cached(T::insert_sql())?;
    for rec in records {
        T::bind_and_execute(&mut stmt, rec)?;
    }
    Ok(records.len())
}
