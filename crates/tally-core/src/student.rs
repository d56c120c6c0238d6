//! Student roster entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student on the roster.
///
/// `violation_points` is a derived cache: it must always equal the sum of
/// points over all violation records for this student. Only the ledger
/// (via the store's atomic append) and the reconciliation operation may
/// write it; roster edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
  pub student_id:       Uuid,
  /// External student code, unique across the roster.
  pub code:             String,
  pub full_name:        String,
  pub class:            String,
  pub grade_level:      u8,
  pub violation_points: i64,
  pub active:           bool,
  pub created_at:       DateTime<Utc>,
}

/// Input to [`crate::store::ConductStore::add_student`].
/// New students start active with zero violation points.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
  pub code:        String,
  pub full_name:   String,
  pub class:       String,
  pub grade_level: u8,
}

/// Partial roster edit. Deliberately has no points field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentUpdate {
  pub full_name:   Option<String>,
  pub class:       Option<String>,
  pub grade_level: Option<u8>,
  pub active:      Option<bool>,
}
