//! Synthetic user records and the capability that produces them.
//!
//! The ingestion loop only sees `RecordGenerator`, so tests can swap the
//! random generator for a deterministic one.

pub mod fake;
pub mod locale;

use chrono::NaiveDate;
use thiserror::Error;

pub use fake::FakeUserGenerator;

/// One synthetic user. Carries no identity until SQLite assigns its `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name:          String,
    pub country:       String,
    pub email:         String,
    pub date_of_birth: NaiveDate,
    pub phone_number:  String,
}

/// Produces one record per call.
pub trait RecordGenerator {
    fn generate(&mut self) -> Result<Record, GeneratorError>;
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    #[error("locale {locale} has no {field} entries")]
    EmptyLocaleData { locale: &'static str, field: &'static str },

    #[error("no valid date of birth for ages {min_age}..={max_age} as of {today}")]
    InvalidDate { min_age: u32, max_age: u32, today: NaiveDate },

    #[error("generator failed: {0}")]
    Other(String),
}
