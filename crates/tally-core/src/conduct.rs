//! Conduct record types — the events the ledger and engine operate on.
//!
//! Every conduct record references exactly one student and one authoring
//! staff user. Achievements and violations are immutable once written;
//! counseling sessions allow post-creation edits to their status and notes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Achievements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
  Academic,
  NonAcademic,
}

/// The scope at which an achievement was awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementLevel {
  School,
  District,
  City,
  Province,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
  pub achievement_id: Uuid,
  /// The date the achievement was earned (event date, not entry date).
  pub date:           NaiveDate,
  pub student_id:     Uuid,
  pub category:       AchievementCategory,
  pub description:    String,
  pub level:          AchievementLevel,
  /// The awarding entity, free text (e.g. a competition organiser).
  pub awarded_by:     String,
  pub notes:          Option<String>,
  pub recorded_by:    Uuid,
  /// Server-assigned entry timestamp; never changes after creation.
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::ConductStore::add_achievement`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewAchievement {
  pub date:        NaiveDate,
  pub student_id:  Uuid,
  pub category:    AchievementCategory,
  pub description: String,
  pub level:       AchievementLevel,
  pub awarded_by:  String,
  pub notes:       Option<String>,
  pub recorded_by: Uuid,
}

// ─── Violations ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
  Discipline,
  Attitude,
  Uniform,
  Attendance,
  Academic,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  Light,
  Medium,
  Heavy,
}

/// How the violation was handled by staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlingMethod {
  Warning,
  ParentCall,
  Coaching,
  Suspension,
  CommunityService,
}

/// A recorded violation. Creating one is the only event that increments a
/// student's cached point total; the two writes commit as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
  pub violation_id: Uuid,
  pub date:         NaiveDate,
  pub student_id:   Uuid,
  pub kind:         ViolationKind,
  pub description:  String,
  pub severity:     Severity,
  /// Point value, caller-supplied (>= 1). Severity does not determine it;
  /// see [`crate::ledger::suggested_points`] for the advisory tariff.
  pub points:       i64,
  pub handling:     HandlingMethod,
  pub recorded_by:  Uuid,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::ConductStore::append_violation`].
#[derive(Debug, Clone)]
pub struct NewViolation {
  pub date:        NaiveDate,
  pub student_id:  Uuid,
  pub kind:        ViolationKind,
  pub description: String,
  pub severity:    Severity,
  pub points:      i64,
  pub handling:    HandlingMethod,
  pub recorded_by: Uuid,
}

// ─── Counseling sessions ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
  Completed,
  NeedsFollowUp,
  Rescheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounselingSession {
  pub session_id:        Uuid,
  pub date:              NaiveDate,
  pub student_id:        Uuid,
  pub purpose:           String,
  pub summary:           String,
  pub follow_up_actions: Option<String>,
  pub status:            SessionStatus,
  pub recorded_by:       Uuid,
  pub created_at:        DateTime<Utc>,
}

/// Input to [`crate::store::ConductStore::add_session`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCounselingSession {
  pub date:              NaiveDate,
  pub student_id:        Uuid,
  pub purpose:           String,
  pub summary:           String,
  pub follow_up_actions: Option<String>,
  pub status:            SessionStatus,
  pub recorded_by:       Uuid,
}

/// Partial edit of a counseling session. Any status may replace any other;
/// transitions are logged, not restricted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionUpdate {
  pub purpose:           Option<String>,
  pub summary:           Option<String>,
  pub follow_up_actions: Option<Option<String>>,
  pub status:            Option<SessionStatus>,
}
