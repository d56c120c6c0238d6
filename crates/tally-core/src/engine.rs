//! The aggregation engine — role-scoped dashboard statistics, the merged
//! recent-activity feed, and prioritized notifications.
//!
//! Everything here is a query: the engine rescans the store on every call
//! and persists nothing. The reads behind one call are independent and need
//! not be point-in-time consistent with each other; any read failure fails
//! the whole call rather than degrading to a partial result.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  conduct::{SessionStatus, Severity},
  staff::StaffRole,
  store::{
    AchievementFilter, ConductStore, SessionFilter, StudentFilter,
    ViolationFilter,
  },
  visibility::{Viewer, sees_class_alert, sees_follow_up},
};

// ─── Thresholds and caps ─────────────────────────────────────────────────────

/// Students at or above this cached point total trigger an alert.
pub const HIGH_POINTS_THRESHOLD: i64 = 50;
/// At or above this total the alert is high priority instead of medium.
pub const CRITICAL_POINTS_THRESHOLD: i64 = 100;
/// Severe violations stay on the notification list this long after entry.
const SEVERE_WINDOW_DAYS: i64 = 7;

const MAX_NOTIFICATIONS: usize = 20;
const MAX_RECENT_ACTIVITY: usize = 10;

// ─── Output types ────────────────────────────────────────────────────────────

/// Notification priority; the ordering is used for ranking.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  Medium,
  High,
}

/// The typed payload of a notification. The variant name serves as the
/// notification kind on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
  HighViolationPoints {
    points: i64,
  },
  FollowUpNeeded {
    session_id: Uuid,
    purpose:    String,
    date:       NaiveDate,
  },
  SevereViolation {
    violation_id: Uuid,
    description:  String,
  },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
  #[serde(flatten)]
  pub kind:         NotificationKind,
  pub student_id:   Uuid,
  pub student_name: String,
  pub message:      String,
  pub priority:     Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
  Achievement,
  Violation,
  Counseling,
}

/// One entry in the merged recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
  pub id:           Uuid,
  pub kind:         ActivityKind,
  pub student_name: String,
  pub description:  String,
  pub date:         NaiveDate,
}

/// Role-dependent dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardStats {
  Admin {
    active_students:         usize,
    active_staff:            usize,
    total_achievements:      usize,
    total_violations:        usize,
    total_counseling_sessions: usize,
  },
  SubjectTeacher {
    /// Achievements plus violations authored by this teacher.
    my_records: usize,
  },
  CounselingTeacher {
    my_sessions:        usize,
    pending_follow_ups: usize,
  },
  HomeroomTeacher {
    class_students:     usize,
    class_violations:   usize,
    class_achievements: usize,
  },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
  pub stats:           DashboardStats,
  pub recent_activity: Vec<ActivityEntry>,
  pub notifications:   Vec<Notification>,
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Compute the full dashboard for a viewer: stats, recent activity, and
/// notifications.
pub async fn dashboard<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
) -> Result<DashboardData, S::Error> {
  Ok(DashboardData {
    stats:           stats(store, viewer).await?,
    recent_activity: recent_activity(store, viewer).await?,
    notifications:   notifications(store, viewer).await?,
  })
}

async fn stats<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
) -> Result<DashboardStats, S::Error> {
  match viewer.role {
    StaffRole::Admin => {
      let students = store
        .list_students(&StudentFilter { active_only: true, ..Default::default() })
        .await
        .map_err(Error::Store)?;
      let staff = store.list_staff(true).await.map_err(Error::Store)?;
      let achievements = store
        .list_achievements(&AchievementFilter::default())
        .await
        .map_err(Error::Store)?;
      let violations = store
        .list_violations(&ViolationFilter::default())
        .await
        .map_err(Error::Store)?;
      let sessions = store
        .list_sessions(&SessionFilter::default())
        .await
        .map_err(Error::Store)?;

      Ok(DashboardStats::Admin {
        active_students:           students.len(),
        active_staff:              staff.len(),
        total_achievements:        achievements.len(),
        total_violations:          violations.len(),
        total_counseling_sessions: sessions.len(),
      })
    }

    StaffRole::SubjectTeacher => {
      let mine = Some(viewer.staff_id);
      let achievements = store
        .list_achievements(&AchievementFilter {
          recorded_by: mine,
          ..Default::default()
        })
        .await
        .map_err(Error::Store)?;
      let violations = store
        .list_violations(&ViolationFilter { recorded_by: mine, ..Default::default() })
        .await
        .map_err(Error::Store)?;

      Ok(DashboardStats::SubjectTeacher {
        my_records: achievements.len() + violations.len(),
      })
    }

    StaffRole::CounselingTeacher => {
      let sessions = store
        .list_sessions(&SessionFilter {
          recorded_by: Some(viewer.staff_id),
          ..Default::default()
        })
        .await
        .map_err(Error::Store)?;
      let pending = sessions
        .iter()
        .filter(|row| row.session.status == SessionStatus::NeedsFollowUp)
        .count();

      Ok(DashboardStats::CounselingTeacher {
        my_sessions:        sessions.len(),
        pending_follow_ups: pending,
      })
    }

    StaffRole::HomeroomTeacher => {
      let Some(class) = viewer.assigned_class.clone() else {
        // A homeroom teacher without a class assignment scopes to nothing.
        return Ok(DashboardStats::HomeroomTeacher {
          class_students:     0,
          class_violations:   0,
          class_achievements: 0,
        });
      };

      let students = store
        .list_students(&StudentFilter {
          class:       Some(class.clone()),
          active_only: true,
          ..Default::default()
        })
        .await
        .map_err(Error::Store)?;
      let violations = store
        .list_violations(&ViolationFilter {
          class: Some(class.clone()),
          ..Default::default()
        })
        .await
        .map_err(Error::Store)?;
      let achievements = store
        .list_achievements(&AchievementFilter { class: Some(class), ..Default::default() })
        .await
        .map_err(Error::Store)?;

      Ok(DashboardStats::HomeroomTeacher {
        class_students:     students.len(),
        class_violations:   violations.len(),
        class_achievements: achievements.len(),
      })
    }
  }
}

// ─── Recent activity ─────────────────────────────────────────────────────────

/// The merged recent-activity feed, scoped exactly as the stats are.
///
/// Streams merge in fixed order (achievements, violations, counseling) so
/// that same-date entries order deterministically; the stable sort then
/// ranks by event date descending and the result is capped at
/// `MAX_RECENT_ACTIVITY`.
pub async fn recent_activity<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
) -> Result<Vec<ActivityEntry>, S::Error> {
  let (achievement_filter, violation_filter, session_filter) = match viewer.role {
    StaffRole::Admin => (
      Some(AchievementFilter::default()),
      Some(ViolationFilter::default()),
      Some(SessionFilter::default()),
    ),
    StaffRole::SubjectTeacher => (
      Some(AchievementFilter {
        recorded_by: Some(viewer.staff_id),
        ..Default::default()
      }),
      Some(ViolationFilter {
        recorded_by: Some(viewer.staff_id),
        ..Default::default()
      }),
      None,
    ),
    StaffRole::CounselingTeacher => (
      None,
      None,
      Some(SessionFilter {
        recorded_by: Some(viewer.staff_id),
        ..Default::default()
      }),
    ),
    StaffRole::HomeroomTeacher => match viewer.assigned_class.clone() {
      None => (None, None, None),
      Some(class) => (
        Some(AchievementFilter { class: Some(class.clone()), ..Default::default() }),
        Some(ViolationFilter { class: Some(class.clone()), ..Default::default() }),
        Some(SessionFilter { class: Some(class), ..Default::default() }),
      ),
    },
  };

  let mut entries = Vec::new();

  if let Some(filter) = achievement_filter {
    for row in store.list_achievements(&filter).await.map_err(Error::Store)? {
      entries.push(ActivityEntry {
        id:           row.achievement.achievement_id,
        kind:         ActivityKind::Achievement,
        student_name: row.student_name,
        description:  row.achievement.description,
        date:         row.achievement.date,
      });
    }
  }
  if let Some(filter) = violation_filter {
    for row in store.list_violations(&filter).await.map_err(Error::Store)? {
      entries.push(ActivityEntry {
        id:           row.violation.violation_id,
        kind:         ActivityKind::Violation,
        student_name: row.student_name,
        description:  row.violation.description,
        date:         row.violation.date,
      });
    }
  }
  if let Some(filter) = session_filter {
    for row in store.list_sessions(&filter).await.map_err(Error::Store)? {
      entries.push(ActivityEntry {
        id:           row.session.session_id,
        kind:         ActivityKind::Counseling,
        student_name: row.student_name,
        description:  row.session.purpose,
        date:         row.session.date,
      });
    }
  }

  Ok(finalize_activity(entries))
}

fn finalize_activity(mut entries: Vec<ActivityEntry>) -> Vec<ActivityEntry> {
  // sort_by is stable: same-date entries keep stream order.
  entries.sort_by(|a, b| b.date.cmp(&a.date));
  entries.truncate(MAX_RECENT_ACTIVITY);
  entries
}

// ─── Notifications ───────────────────────────────────────────────────────────

/// Produce the prioritized notification list for a viewer.
///
/// Three generators run in fixed order (high point totals, pending
/// follow-ups, recent severe violations); the merged list is stable-sorted
/// by priority descending and capped at `MAX_NOTIFICATIONS`.
pub async fn notifications<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
) -> Result<Vec<Notification>, S::Error> {
  let mut out = Vec::new();
  high_point_alerts(store, viewer, &mut out).await?;
  follow_up_alerts(store, viewer, &mut out).await?;
  severe_violation_alerts(store, viewer, &mut out).await?;
  Ok(rank(out))
}

async fn high_point_alerts<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
  out:    &mut Vec<Notification>,
) -> Result<(), S::Error> {
  if !matches!(viewer.role, StaffRole::Admin | StaffRole::HomeroomTeacher) {
    return Ok(());
  }

  let students = store
    .list_students(&StudentFilter {
      active_only: true,
      min_points:  Some(HIGH_POINTS_THRESHOLD),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;

  for student in students {
    if !sees_class_alert(viewer, &student.class) {
      continue;
    }
    let priority = if student.violation_points >= CRITICAL_POINTS_THRESHOLD {
      Priority::High
    } else {
      Priority::Medium
    };
    out.push(Notification {
      kind:         NotificationKind::HighViolationPoints {
        points: student.violation_points,
      },
      student_id:   student.student_id,
      message:      format!(
        "{} has {} violation points",
        student.full_name, student.violation_points
      ),
      student_name: student.full_name,
      priority,
    });
  }
  Ok(())
}

async fn follow_up_alerts<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
  out:    &mut Vec<Notification>,
) -> Result<(), S::Error> {
  let filter = match viewer.role {
    StaffRole::Admin => SessionFilter {
      status: Some(SessionStatus::NeedsFollowUp),
      ..Default::default()
    },
    StaffRole::CounselingTeacher => SessionFilter {
      status:      Some(SessionStatus::NeedsFollowUp),
      recorded_by: Some(viewer.staff_id),
      ..Default::default()
    },
    StaffRole::SubjectTeacher | StaffRole::HomeroomTeacher => return Ok(()),
  };

  for row in store.list_sessions(&filter).await.map_err(Error::Store)? {
    debug_assert!(sees_follow_up(viewer, row.session.recorded_by));
    out.push(Notification {
      kind:         NotificationKind::FollowUpNeeded {
        session_id: row.session.session_id,
        purpose:    row.session.purpose,
        date:       row.session.date,
      },
      student_id:   row.session.student_id,
      message:      format!("Follow-up needed for {}", row.student_name),
      student_name: row.student_name,
      priority:     Priority::Medium,
    });
  }
  Ok(())
}

async fn severe_violation_alerts<S: ConductStore>(
  store:  &S,
  viewer: &Viewer,
  out:    &mut Vec<Notification>,
) -> Result<(), S::Error> {
  if !matches!(viewer.role, StaffRole::Admin | StaffRole::HomeroomTeacher) {
    return Ok(());
  }

  // Windowed on the entry timestamp, not the event date: a violation
  // back-dated at entry time still alerts.
  let cutoff = Utc::now() - Duration::days(SEVERE_WINDOW_DAYS);
  let rows = store
    .list_violations(&ViolationFilter {
      severity:      Some(Severity::Heavy),
      created_after: Some(cutoff),
      ..Default::default()
    })
    .await
    .map_err(Error::Store)?;

  for row in rows {
    if !sees_class_alert(viewer, &row.student_class) {
      continue;
    }
    out.push(Notification {
      kind:         NotificationKind::SevereViolation {
        violation_id: row.violation.violation_id,
        description:  row.violation.description.clone(),
      },
      student_id:   row.violation.student_id,
      message:      format!("Severe violation: {}", row.violation.description),
      student_name: row.student_name,
      priority:     Priority::High,
    });
  }
  Ok(())
}

fn rank(mut notifications: Vec<Notification>) -> Vec<Notification> {
  // Stable sort: within a priority band, generator emission order holds.
  notifications.sort_by(|a, b| b.priority.cmp(&a.priority));
  notifications.truncate(MAX_NOTIFICATIONS);
  notifications
}

#[cfg(test)]
mod tests {
  use super::*;

  fn note(name: &str, priority: Priority) -> Notification {
    Notification {
      kind:         NotificationKind::HighViolationPoints { points: 0 },
      student_id:   Uuid::new_v4(),
      student_name: name.to_string(),
      message:      String::new(),
      priority,
    }
  }

  #[test]
  fn rank_orders_by_priority_and_keeps_relative_order() {
    let ranked = rank(vec![
      note("m1", Priority::Medium),
      note("h1", Priority::High),
      note("m2", Priority::Medium),
      note("h2", Priority::High),
    ]);
    let names: Vec<_> =
      ranked.iter().map(|n| n.student_name.as_str()).collect();
    assert_eq!(names, ["h1", "h2", "m1", "m2"]);
  }

  #[test]
  fn rank_caps_at_twenty() {
    let many = (0..30).map(|i| {
      note(&format!("s{i}"), if i % 2 == 0 { Priority::High } else { Priority::Low })
    });
    let ranked = rank(many.collect());
    assert_eq!(ranked.len(), 20);
    assert_eq!(ranked[0].priority, Priority::High);
  }

  #[test]
  fn priority_ordering() {
    assert!(Priority::High > Priority::Medium);
    assert!(Priority::Medium > Priority::Low);
  }

  fn entry(name: &str, kind: ActivityKind, date: &str) -> ActivityEntry {
    ActivityEntry {
      id:           Uuid::new_v4(),
      kind,
      student_name: name.to_string(),
      description:  String::new(),
      date:         date.parse().unwrap(),
    }
  }

  #[test]
  fn activity_sorts_by_date_desc_with_stream_order_tiebreak() {
    // Pushed in stream order: achievements, then violations, then counseling.
    let merged = finalize_activity(vec![
      entry("a-old", ActivityKind::Achievement, "2024-03-01"),
      entry("a-new", ActivityKind::Achievement, "2024-03-10"),
      entry("v-new", ActivityKind::Violation, "2024-03-10"),
      entry("c-mid", ActivityKind::Counseling, "2024-03-05"),
    ]);
    let names: Vec<_> =
      merged.iter().map(|e| e.student_name.as_str()).collect();
    assert_eq!(names, ["a-new", "v-new", "c-mid", "a-old"]);
  }

  #[test]
  fn activity_truncates_to_ten() {
    let entries = (1..=15)
      .map(|d| {
        entry(
          &format!("s{d}"),
          ActivityKind::Violation,
          &format!("2024-03-{d:02}"),
        )
      })
      .collect();
    let merged = finalize_activity(entries);
    assert_eq!(merged.len(), 10);
    assert_eq!(merged[0].student_name, "s15");
    assert_eq!(merged[9].student_name, "s6");
  }
}
