//! The `ConductStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `tally-store-sqlite`).
//! Higher layers (the ledger, the aggregation engine, `tally-api`) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  conduct::{
    Achievement, CounselingSession, NewAchievement, NewCounselingSession,
    NewViolation, SessionStatus, SessionUpdate, Severity, Violation,
  },
  staff::{NewStaffUser, StaffUpdate, StaffUser},
  student::{NewStudent, Student, StudentUpdate},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`ConductStore::list_students`].
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
  pub class:       Option<String>,
  pub active_only: bool,
  /// Only students with at least this many cached violation points.
  pub min_points:  Option<i64>,
}

/// Parameters for [`ConductStore::list_achievements`].
#[derive(Debug, Clone, Default)]
pub struct AchievementFilter {
  pub student_id:  Option<Uuid>,
  pub recorded_by: Option<Uuid>,
  /// Restrict to achievements of students in this class.
  pub class:       Option<String>,
}

/// Parameters for [`ConductStore::list_violations`].
#[derive(Debug, Clone, Default)]
pub struct ViolationFilter {
  pub student_id:    Option<Uuid>,
  pub recorded_by:   Option<Uuid>,
  pub class:         Option<String>,
  pub severity:      Option<Severity>,
  /// Filter on the entry timestamp, not the event date.
  pub created_after: Option<DateTime<Utc>>,
}

/// Parameters for [`ConductStore::list_sessions`].
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
  pub student_id:  Option<Uuid>,
  pub recorded_by: Option<Uuid>,
  pub class:       Option<String>,
  pub status:      Option<SessionStatus>,
}

// ─── Join rows ───────────────────────────────────────────────────────────────

// List reads return records joined with the owning student's name and class
// so the aggregation engine never does per-record lookups.

#[derive(Debug, Clone, Serialize)]
pub struct AchievementRow {
  pub achievement:   Achievement,
  pub student_name:  String,
  pub student_class: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViolationRow {
  pub violation:     Violation,
  pub student_name:  String,
  pub student_class: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionRow {
  pub session:       CounselingSession,
  pub student_name:  String,
  pub student_class: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Tally storage backend.
///
/// Identifiers and `created_at` timestamps are assigned by the store; they
/// are never accepted from callers.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ConductStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Staff ─────────────────────────────────────────────────────────────

  /// Create and persist a staff account. New accounts start active.
  fn add_staff(
    &self,
    input: NewStaffUser,
  ) -> impl Future<Output = Result<StaffUser, Self::Error>> + Send + '_;

  /// Retrieve a staff account by id. Returns `None` if not found.
  fn get_staff(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StaffUser>, Self::Error>> + Send + '_;

  /// List staff accounts, optionally restricted to active ones.
  fn list_staff(
    &self,
    active_only: bool,
  ) -> impl Future<Output = Result<Vec<StaffUser>, Self::Error>> + Send + '_;

  /// Apply a partial edit. Returns `None` if the account does not exist.
  /// Deactivation is `StaffUpdate { active: Some(false), .. }`.
  fn update_staff(
    &self,
    id: Uuid,
    update: StaffUpdate,
  ) -> impl Future<Output = Result<Option<StaffUser>, Self::Error>> + Send + '_;

  // ── Students ──────────────────────────────────────────────────────────

  /// Create a roster entry. Fails if the student code is already taken.
  fn add_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn get_student(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Look a student up by external code (the bulk-upload duplicate check).
  fn get_student_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + 'a;

  fn list_students<'a>(
    &'a self,
    filter: &'a StudentFilter,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + 'a;

  /// Apply a roster edit. The cached point total is not editable here.
  fn update_student(
    &self,
    id: Uuid,
    update: StudentUpdate,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  // ── Ledger primitives ─────────────────────────────────────────────────

  /// Insert a violation record **and** add its points to the owning
  /// student's cached total, committing both as one unit. The increment
  /// must be relative (`total = total + points`), never a read-then-write.
  ///
  /// Fails with no side effects if the student row is absent.
  fn append_violation(
    &self,
    input: NewViolation,
  ) -> impl Future<Output = Result<Violation, Self::Error>> + Send + '_;

  /// Recompute `Σ points` over the student's violation records.
  /// Returns 0 for a student with no violations (or no row at all).
  fn sum_violation_points(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Overwrite the cached point total. Reconciliation only — everything
  /// else goes through [`ConductStore::append_violation`]. Returns `false`
  /// if the student does not exist.
  fn set_violation_points(
    &self,
    student_id: Uuid,
    total: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn list_violations<'a>(
    &'a self,
    filter: &'a ViolationFilter,
  ) -> impl Future<Output = Result<Vec<ViolationRow>, Self::Error>> + Send + 'a;

  // ── Achievements ──────────────────────────────────────────────────────

  fn add_achievement(
    &self,
    input: NewAchievement,
  ) -> impl Future<Output = Result<Achievement, Self::Error>> + Send + '_;

  fn list_achievements<'a>(
    &'a self,
    filter: &'a AchievementFilter,
  ) -> impl Future<Output = Result<Vec<AchievementRow>, Self::Error>> + Send + 'a;

  // ── Counseling sessions ───────────────────────────────────────────────

  fn add_session(
    &self,
    input: NewCounselingSession,
  ) -> impl Future<Output = Result<CounselingSession, Self::Error>> + Send + '_;

  fn get_session(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CounselingSession>, Self::Error>> + Send + '_;

  /// Apply a session edit. Returns `None` if the session does not exist.
  fn update_session(
    &self,
    id: Uuid,
    update: SessionUpdate,
  ) -> impl Future<Output = Result<Option<CounselingSession>, Self::Error>> + Send + '_;

  fn list_sessions<'a>(
    &'a self,
    filter: &'a SessionFilter,
  ) -> impl Future<Output = Result<Vec<SessionRow>, Self::Error>> + Send + 'a;
}
