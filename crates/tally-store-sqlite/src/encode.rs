//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, event dates as `YYYY-MM-DD`,
//! enums as their snake_case names, UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use tally_core::{
  conduct::{
    Achievement, AchievementCategory, AchievementLevel, CounselingSession,
    HandlingMethod, SessionStatus, Severity, Violation, ViolationKind,
  },
  staff::{StaffRole, StaffUser},
  store::{AchievementRow, SessionRow, ViolationRow},
  student::Student,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn encode_role(r: StaffRole) -> &'static str {
  match r {
    StaffRole::Admin => "admin",
    StaffRole::SubjectTeacher => "subject_teacher",
    StaffRole::CounselingTeacher => "counseling_teacher",
    StaffRole::HomeroomTeacher => "homeroom_teacher",
  }
}

pub fn decode_role(s: &str) -> Result<StaffRole> {
  match s {
    "admin" => Ok(StaffRole::Admin),
    "subject_teacher" => Ok(StaffRole::SubjectTeacher),
    "counseling_teacher" => Ok(StaffRole::CounselingTeacher),
    "homeroom_teacher" => Ok(StaffRole::HomeroomTeacher),
    other => Err(Error::UnknownVariant { what: "staff role", value: other.into() }),
  }
}

pub fn encode_category(c: AchievementCategory) -> &'static str {
  match c {
    AchievementCategory::Academic => "academic",
    AchievementCategory::NonAcademic => "non_academic",
  }
}

pub fn decode_category(s: &str) -> Result<AchievementCategory> {
  match s {
    "academic" => Ok(AchievementCategory::Academic),
    "non_academic" => Ok(AchievementCategory::NonAcademic),
    other => Err(Error::UnknownVariant {
      what:  "achievement category",
      value: other.into(),
    }),
  }
}

pub fn encode_level(l: AchievementLevel) -> &'static str {
  match l {
    AchievementLevel::School => "school",
    AchievementLevel::District => "district",
    AchievementLevel::City => "city",
    AchievementLevel::Province => "province",
  }
}

pub fn decode_level(s: &str) -> Result<AchievementLevel> {
  match s {
    "school" => Ok(AchievementLevel::School),
    "district" => Ok(AchievementLevel::District),
    "city" => Ok(AchievementLevel::City),
    "province" => Ok(AchievementLevel::Province),
    other => Err(Error::UnknownVariant {
      what:  "achievement level",
      value: other.into(),
    }),
  }
}

pub fn encode_violation_kind(k: ViolationKind) -> &'static str {
  match k {
    ViolationKind::Discipline => "discipline",
    ViolationKind::Attitude => "attitude",
    ViolationKind::Uniform => "uniform",
    ViolationKind::Attendance => "attendance",
    ViolationKind::Academic => "academic",
    ViolationKind::Other => "other",
  }
}

pub fn decode_violation_kind(s: &str) -> Result<ViolationKind> {
  match s {
    "discipline" => Ok(ViolationKind::Discipline),
    "attitude" => Ok(ViolationKind::Attitude),
    "uniform" => Ok(ViolationKind::Uniform),
    "attendance" => Ok(ViolationKind::Attendance),
    "academic" => Ok(ViolationKind::Academic),
    "other" => Ok(ViolationKind::Other),
    other => Err(Error::UnknownVariant {
      what:  "violation kind",
      value: other.into(),
    }),
  }
}

pub fn encode_severity(s: Severity) -> &'static str {
  match s {
    Severity::Light => "light",
    Severity::Medium => "medium",
    Severity::Heavy => "heavy",
  }
}

pub fn decode_severity(s: &str) -> Result<Severity> {
  match s {
    "light" => Ok(Severity::Light),
    "medium" => Ok(Severity::Medium),
    "heavy" => Ok(Severity::Heavy),
    other => Err(Error::UnknownVariant { what: "severity", value: other.into() }),
  }
}

pub fn encode_handling(h: HandlingMethod) -> &'static str {
  match h {
    HandlingMethod::Warning => "warning",
    HandlingMethod::ParentCall => "parent_call",
    HandlingMethod::Coaching => "coaching",
    HandlingMethod::Suspension => "suspension",
    HandlingMethod::CommunityService => "community_service",
  }
}

pub fn decode_handling(s: &str) -> Result<HandlingMethod> {
  match s {
    "warning" => Ok(HandlingMethod::Warning),
    "parent_call" => Ok(HandlingMethod::ParentCall),
    "coaching" => Ok(HandlingMethod::Coaching),
    "suspension" => Ok(HandlingMethod::Suspension),
    "community_service" => Ok(HandlingMethod::CommunityService),
    other => Err(Error::UnknownVariant {
      what:  "handling method",
      value: other.into(),
    }),
  }
}

pub fn encode_status(s: SessionStatus) -> &'static str {
  match s {
    SessionStatus::Completed => "completed",
    SessionStatus::NeedsFollowUp => "needs_follow_up",
    SessionStatus::Rescheduled => "rescheduled",
  }
}

pub fn decode_status(s: &str) -> Result<SessionStatus> {
  match s {
    "completed" => Ok(SessionStatus::Completed),
    "needs_follow_up" => Ok(SessionStatus::NeedsFollowUp),
    "rescheduled" => Ok(SessionStatus::Rescheduled),
    other => Err(Error::UnknownVariant {
      what:  "session status",
      value: other.into(),
    }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `staff` row.
pub struct RawStaff {
  pub staff_id:       String,
  pub username:       String,
  pub email:          String,
  pub full_name:      String,
  pub role:           String,
  pub assigned_class: Option<String>,
  pub active:         i64,
  pub created_at:     String,
}

impl RawStaff {
  pub fn into_staff(self) -> Result<StaffUser> {
    Ok(StaffUser {
      staff_id:       decode_uuid(&self.staff_id)?,
      username:       self.username,
      email:          self.email,
      full_name:      self.full_name,
      role:           decode_role(&self.role)?,
      assigned_class: self.assigned_class,
      active:         self.active != 0,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `students` row.
pub struct RawStudent {
  pub student_id:       String,
  pub code:             String,
  pub full_name:        String,
  pub class:            String,
  pub grade_level:      i64,
  pub violation_points: i64,
  pub active:           i64,
  pub created_at:       String,
}

impl RawStudent {
  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      student_id:       decode_uuid(&self.student_id)?,
      code:             self.code,
      full_name:        self.full_name,
      class:            self.class,
      grade_level:      self.grade_level as u8,
      violation_points: self.violation_points,
      active:           self.active != 0,
      created_at:       decode_dt(&self.created_at)?,
    })
  }
}

/// An `achievements` row joined with the owning student's name and class.
pub struct RawAchievement {
  pub achievement_id: String,
  pub date:           String,
  pub student_id:     String,
  pub category:       String,
  pub description:    String,
  pub level:          String,
  pub awarded_by:     String,
  pub notes:          Option<String>,
  pub recorded_by:    String,
  pub created_at:     String,
  pub student_name:   String,
  pub student_class:  String,
}

impl RawAchievement {
  pub fn into_row(self) -> Result<AchievementRow> {
    Ok(AchievementRow {
      achievement:   Achievement {
        achievement_id: decode_uuid(&self.achievement_id)?,
        date:           decode_date(&self.date)?,
        student_id:     decode_uuid(&self.student_id)?,
        category:       decode_category(&self.category)?,
        description:    self.description,
        level:          decode_level(&self.level)?,
        awarded_by:     self.awarded_by,
        notes:          self.notes,
        recorded_by:    decode_uuid(&self.recorded_by)?,
        created_at:     decode_dt(&self.created_at)?,
      },
      student_name:  self.student_name,
      student_class: self.student_class,
    })
  }
}

/// A `violations` row joined with the owning student's name and class.
pub struct RawViolation {
  pub violation_id:  String,
  pub date:          String,
  pub student_id:    String,
  pub kind:          String,
  pub description:   String,
  pub severity:      String,
  pub points:        i64,
  pub handling:      String,
  pub recorded_by:   String,
  pub created_at:    String,
  pub student_name:  String,
  pub student_class: String,
}

impl RawViolation {
  pub fn into_row(self) -> Result<ViolationRow> {
    Ok(ViolationRow {
      violation:     Violation {
        violation_id: decode_uuid(&self.violation_id)?,
        date:         decode_date(&self.date)?,
        student_id:   decode_uuid(&self.student_id)?,
        kind:         decode_violation_kind(&self.kind)?,
        description:  self.description,
        severity:     decode_severity(&self.severity)?,
        points:       self.points,
        handling:     decode_handling(&self.handling)?,
        recorded_by:  decode_uuid(&self.recorded_by)?,
        created_at:   decode_dt(&self.created_at)?,
      },
      student_name:  self.student_name,
      student_class: self.student_class,
    })
  }
}

/// A `counseling_sessions` row joined with the owning student's name and
/// class.
pub struct RawSession {
  pub session_id:        String,
  pub date:              String,
  pub student_id:        String,
  pub purpose:           String,
  pub summary:           String,
  pub follow_up_actions: Option<String>,
  pub status:            String,
  pub recorded_by:       String,
  pub created_at:        String,
  pub student_name:      String,
  pub student_class:     String,
}

impl RawSession {
  pub fn into_session(self) -> Result<CounselingSession> {
    Ok(CounselingSession {
      session_id:        decode_uuid(&self.session_id)?,
      date:              decode_date(&self.date)?,
      student_id:        decode_uuid(&self.student_id)?,
      purpose:           self.purpose,
      summary:           self.summary,
      follow_up_actions: self.follow_up_actions,
      status:            decode_status(&self.status)?,
      recorded_by:       decode_uuid(&self.recorded_by)?,
      created_at:        decode_dt(&self.created_at)?,
    })
  }

  pub fn into_row(self) -> Result<SessionRow> {
    let student_name = self.student_name.clone();
    let student_class = self.student_class.clone();
    Ok(SessionRow {
      session: self.into_session()?,
      student_name,
      student_class,
    })
  }
}
