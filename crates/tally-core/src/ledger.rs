//! The violation ledger.
//!
//! Owns the invariant that a student's cached point total equals the sum of
//! points over that student's violation records. All violation writes go
//! through [`record_violation`]; the cached total is otherwise only touched
//! by [`reconcile_point_total`].

use uuid::Uuid;

use crate::{
  Entity, Error, Result,
  conduct::{NewViolation, Severity, Violation},
  store::ConductStore,
};

/// Everything a caller supplies when recording a violation; the author comes
/// in separately from the auth collaborator.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ViolationInput {
  pub date:        chrono::NaiveDate,
  pub student_id:  Uuid,
  pub kind:        crate::conduct::ViolationKind,
  pub description: String,
  pub severity:    Severity,
  pub points:      i64,
  pub handling:    crate::conduct::HandlingMethod,
}

/// Advisory severity→points tariff. The ledger records whatever point value
/// the caller supplies; this table is what entry surfaces should suggest.
pub fn suggested_points(severity: Severity) -> i64 {
  match severity {
    Severity::Light => 5,
    Severity::Medium => 15,
    Severity::Heavy => 40,
  }
}

/// Record a violation and atomically bump the owning student's point total.
///
/// Preconditions checked here: `points >= 1`, the author exists and is
/// active, the student exists. The insert and the increment themselves
/// commit as one unit inside [`ConductStore::append_violation`]; a failed
/// call leaves the store unchanged.
pub async fn record_violation<S: ConductStore>(
  store:  &S,
  input:  ViolationInput,
  author: Uuid,
) -> Result<Violation, S::Error> {
  if input.points < 1 {
    return Err(Error::InvalidPoints(input.points));
  }

  let staff = store
    .get_staff(author)
    .await
    .map_err(Error::Store)?
    .ok_or(Error::NotFound { entity: Entity::Staff, id: author })?;
  if !staff.active {
    return Err(Error::InactiveAuthor(author));
  }

  let student = store
    .get_student(input.student_id)
    .await
    .map_err(Error::Store)?
    .ok_or(Error::NotFound { entity: Entity::Student, id: input.student_id })?;

  let violation = store
    .append_violation(NewViolation {
      date:        input.date,
      student_id:  input.student_id,
      kind:        input.kind,
      description: input.description,
      severity:    input.severity,
      points:      input.points,
      handling:    input.handling,
      recorded_by: author,
    })
    .await
    .map_err(Error::Store)?;

  tracing::info!(
    violation_id = %violation.violation_id,
    student = %student.code,
    points = violation.points,
    severity = ?violation.severity,
    "violation recorded"
  );

  Ok(violation)
}

/// Verify the point-total invariant for one student without correcting it.
pub async fn check_point_total<S: ConductStore>(
  store:      &S,
  student_id: Uuid,
) -> Result<(), S::Error> {
  let student = store
    .get_student(student_id)
    .await
    .map_err(Error::Store)?
    .ok_or(Error::NotFound { entity: Entity::Student, id: student_id })?;

  let computed = store
    .sum_violation_points(student_id)
    .await
    .map_err(Error::Store)?;

  if student.violation_points == computed {
    Ok(())
  } else {
    Err(Error::PointTotalDrift {
      student_id,
      cached: student.violation_points,
      computed,
    })
  }
}

/// Recompute the point total from the violation records and rewrite the
/// cache. Idempotent; returns the reconciled total. This is the recovery
/// path for drift detected by [`check_point_total`] — it is never invoked
/// implicitly.
pub async fn reconcile_point_total<S: ConductStore>(
  store:      &S,
  student_id: Uuid,
) -> Result<i64, S::Error> {
  let total = store
    .sum_violation_points(student_id)
    .await
    .map_err(Error::Store)?;

  let updated = store
    .set_violation_points(student_id, total)
    .await
    .map_err(Error::Store)?;
  if !updated {
    return Err(Error::NotFound { entity: Entity::Student, id: student_id });
  }

  tracing::info!(%student_id, total, "point total reconciled");
  Ok(total)
}
