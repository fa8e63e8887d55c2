// src/db/batch_inserts.rs

use rusqlite::{params, Result as SqlResult, Statement};
use crate::generator::Record;

/// Defines how a record of type `T` is written by a prepared statement.
pub trait BatchInsert<T> {
    fn insert_sql() -> &'static str;
    fn bind_and_execute(stmt: &mut Statement<'_>, record: &T) -> SqlResult<()>;
}

/// USERS
impl BatchInsert<Record> for Record {
    fn insert_sql() -> &'static str {
        "INSERT INTO users_db \
           (name, country, email, date_of_birthday, number) \
         VALUES (?1,?2,?3,?4,?5)"
    }

    fn bind_and_execute(stmt: &mut Statement<'_>, rec: &Record) -> SqlResult<()> {
        stmt.execute(params![
            rec.name,
            rec.country,
            rec.email,
            rec.date_of_birth.format("%Y-%m-%d").to_string(),
            rec.phone_number,
        ])?;
        Ok(())
    }
}
