//! Staff identities and roles.
//!
//! Staff users are never physically removed; an account that should stop
//! working is deactivated via [`StaffUpdate::active`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of staff roles. Visibility rules dispatch over this enum;
/// see [`crate::visibility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
  Admin,
  SubjectTeacher,
  CounselingTeacher,
  HomeroomTeacher,
}

/// A staff account.
///
/// `assigned_class` is meaningful only for [`StaffRole::HomeroomTeacher`];
/// for every other role it carries no weight in visibility decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
  pub staff_id:       Uuid,
  pub username:       String,
  pub email:          String,
  pub full_name:      String,
  pub role:           StaffRole,
  pub assigned_class: Option<String>,
  pub active:         bool,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::ConductStore::add_staff`].
/// Identifier and timestamps are assigned by the store; new accounts start
/// active.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStaffUser {
  pub username:       String,
  pub email:          String,
  pub full_name:      String,
  pub role:           StaffRole,
  pub assigned_class: Option<String>,
}

/// Partial update for a staff account. `None` leaves a field untouched;
/// `assigned_class` is doubly optional so a class assignment can be cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffUpdate {
  pub full_name:      Option<String>,
  pub role:           Option<StaffRole>,
  pub assigned_class: Option<Option<String>>,
  pub active:         Option<bool>,
}
