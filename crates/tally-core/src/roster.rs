//! Bulk roster import.
//!
//! The upstream CSV collaborator hands over already-validated rows; this
//! module only does create-if-absent with duplicate detection by student
//! code. Per-row rejections never abort the batch.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, store::ConductStore, student::{NewStudent, Student}};

/// One validated row from a roster upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRow {
  pub code:        String,
  pub full_name:   String,
  pub class:       String,
  pub grade_level: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
  pub row:    RosterRow,
  pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterOutcome {
  pub created: Vec<Student>,
  pub skipped: Vec<SkippedRow>,
}

/// Import a batch of roster rows, skipping rows whose student code already
/// exists. Store failures abort the whole call; duplicates do not.
pub async fn import_roster<S: ConductStore>(
  store: &S,
  rows:  Vec<RosterRow>,
) -> Result<RosterOutcome, S::Error> {
  let mut outcome = RosterOutcome { created: Vec::new(), skipped: Vec::new() };

  for row in rows {
    let existing = store
      .get_student_by_code(&row.code)
      .await
      .map_err(Error::Store)?;
    if existing.is_some() {
      tracing::debug!(code = %row.code, "roster row skipped, code exists");
      outcome.skipped.push(SkippedRow {
        reason: format!("student code {} already exists", row.code),
        row,
      });
      continue;
    }

    let student = store
      .add_student(NewStudent {
        code:        row.code,
        full_name:   row.full_name,
        class:       row.class,
        grade_level: row.grade_level,
      })
      .await
      .map_err(Error::Store)?;
    outcome.created.push(student);
  }

  tracing::info!(
    created = outcome.created.len(),
    skipped = outcome.skipped.len(),
    "roster import finished"
  );
  Ok(outcome)
}
