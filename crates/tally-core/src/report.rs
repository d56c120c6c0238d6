//! Read models for the report-export collaborator.
//!
//! File generation (PDF/Excel) happens outside this crate; these functions
//! only assemble the numbers the exporter renders. They reuse the cached
//! point total and never touch the ledger.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{
  Entity, Error, Result,
  store::{AchievementFilter, ConductStore, SessionFilter, StudentFilter, ViolationFilter},
  student::Student,
};

/// Lifetime record counts for one student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
  pub student:             Student,
  pub achievements:        usize,
  pub violations:          usize,
  pub counseling_sessions: usize,
  pub violation_points:    i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassReportEntry {
  pub student:             Student,
  pub achievements:        usize,
  pub violations:          usize,
  pub counseling_sessions: usize,
  /// Points accrued from violations whose event date falls in the window.
  pub points_in_window:    i64,
}

/// Per-student record counts for a class over a date window.
#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
  pub class:    String,
  pub from:     NaiveDate,
  pub to:       NaiveDate,
  pub students: Vec<ClassReportEntry>,
}

pub async fn student_summary<S: ConductStore>(
  store:      &S,
  student_id: Uuid,
) -> Result<StudentSummary, S::Error> {
  let student = store
    .get_student(student_id)
    .await
    .map_err(Error::Store)?
    .ok_or(Error::NotFound { entity: Entity::Student, id: student_id })?;

  let achievements = store
    .list_achievements(&AchievementFilter {
      student_id: Some(student_id),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;
  let violations = store
    .list_violations(&ViolationFilter {
      student_id: Some(student_id),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;
  let sessions = store
    .list_sessions(&SessionFilter { student_id: Some(student_id), ..Default::default() })
    .await
    .map_err(Error::Store)?;

  Ok(StudentSummary {
    violation_points:    student.violation_points,
    achievements:        achievements.len(),
    violations:          violations.len(),
    counseling_sessions: sessions.len(),
    student,
  })
}

pub async fn class_report<S: ConductStore>(
  store: &S,
  class: &str,
  from:  NaiveDate,
  to:    NaiveDate,
) -> Result<ClassReport, S::Error> {
  let students = store
    .list_students(&StudentFilter {
      class: Some(class.to_string()),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;
  if students.is_empty() {
    return Err(Error::EmptyClass(class.to_string()));
  }

  let in_window = |date: NaiveDate| date >= from && date <= to;

  let achievements = store
    .list_achievements(&AchievementFilter {
      class: Some(class.to_string()),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;
  let violations = store
    .list_violations(&ViolationFilter {
      class: Some(class.to_string()),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;
  let sessions = store
    .list_sessions(&SessionFilter { class: Some(class.to_string()), ..Default::default() })
    .await
    .map_err(Error::Store)?;

  let entries = students
    .into_iter()
    .map(|student| {
      let id = student.student_id;
      ClassReportEntry {
        achievements: achievements
          .iter()
          .filter(|row| {
            row.achievement.student_id == id && in_window(row.achievement.date)
          })
          .count(),
        violations: violations
          .iter()
          .filter(|row| {
            row.violation.student_id == id && in_window(row.violation.date)
          })
          .count(),
        counseling_sessions: sessions
          .iter()
          .filter(|row| {
            row.session.student_id == id && in_window(row.session.date)
          })
          .count(),
        points_in_window: violations
          .iter()
          .filter(|row| {
            row.violation.student_id == id && in_window(row.violation.date)
          })
          .map(|row| row.violation.points)
          .sum(),
        student,
      }
    })
    .collect();

  Ok(ClassReport {
    class: class.to_string(),
    from,
    to,
    students: entries,
  })
}
