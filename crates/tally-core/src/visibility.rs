//! Role visibility policy — one pure function instead of role checks
//! scattered across aggregation code.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::staff::{StaffRole, StaffUser};

/// The viewing staff member, as resolved by the caller's auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewer {
  pub staff_id:       Uuid,
  pub role:           StaffRole,
  pub assigned_class: Option<String>,
}

impl Viewer {
  pub fn for_user(user: &StaffUser) -> Self {
    Self {
      staff_id:       user.staff_id,
      role:           user.role,
      assigned_class: user.assigned_class.clone(),
    }
  }
}

/// Whether `viewer` may see a conduct record owned by a student in
/// `record_class` and authored by `record_author`.
///
/// Total over [`StaffRole`]: admins see everything, homeroom teachers see
/// their assigned class, counseling and subject teachers see what they
/// authored.
pub fn is_visible(viewer: &Viewer, record_class: &str, record_author: Uuid) -> bool {
  match viewer.role {
    StaffRole::Admin => true,
    StaffRole::HomeroomTeacher => {
      viewer.assigned_class.as_deref() == Some(record_class)
    }
    StaffRole::CounselingTeacher | StaffRole::SubjectTeacher => {
      record_author == viewer.staff_id
    }
  }
}

/// Audience for the student-scoped alerts (high point totals, severe
/// violations): admins, plus the homeroom teacher of the student's class.
/// Subject and counseling teachers receive no systemic alerts.
pub fn sees_class_alert(viewer: &Viewer, student_class: &str) -> bool {
  match viewer.role {
    StaffRole::Admin => true,
    StaffRole::HomeroomTeacher => {
      viewer.assigned_class.as_deref() == Some(student_class)
    }
    StaffRole::CounselingTeacher | StaffRole::SubjectTeacher => false,
  }
}

/// Audience for follow-up notifications: admins see all pending follow-ups,
/// counseling teachers only the sessions they authored.
pub fn sees_follow_up(viewer: &Viewer, session_author: Uuid) -> bool {
  match viewer.role {
    StaffRole::Admin => true,
    StaffRole::CounselingTeacher => session_author == viewer.staff_id,
    StaffRole::HomeroomTeacher | StaffRole::SubjectTeacher => false,
  }
}
