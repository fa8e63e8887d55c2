// src/db/mod.rs
//! Public façade for DB helpers.

pub mod batch_inserts;
pub mod connection;
pub mod gateway;

pub use batch_inserts::BatchInsert;
pub use gateway::{SqliteSession, StorageError, StorageGateway};
