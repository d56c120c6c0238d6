//! Error type for `tally-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {what}: {value:?}")]
  UnknownVariant {
    what:  &'static str,
    value: String,
  },

  /// The atomic violation append found no student row to increment.
  #[error("student not found: {0}")]
  StudentNotFound(Uuid),

  #[error("student code {0:?} already exists")]
  DuplicateStudentCode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
