//! Integration tests for `SqliteStore` against an in-memory database,
//! including the ledger, aggregation engine, roster import, and report
//! read models running on top of it.

use chrono::NaiveDate;
use tally_core::{
  Entity, Error as CoreError, counseling,
  conduct::{
    AchievementCategory, AchievementLevel, HandlingMethod, NewAchievement,
    NewCounselingSession, SessionStatus, SessionUpdate, Severity,
    ViolationKind,
  },
  engine::{self, ActivityKind, DashboardStats, NotificationKind, Priority},
  ledger::{self, ViolationInput},
  report,
  roster::{self, RosterRow},
  staff::{NewStaffUser, StaffRole, StaffUpdate, StaffUser},
  store::{
    AchievementFilter, ConductStore, SessionFilter, StudentFilter,
    ViolationFilter,
  },
  student::{NewStudent, Student, StudentUpdate},
  visibility::Viewer,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn add_staff(
  s:        &SqliteStore,
  username: &str,
  role:     StaffRole,
  class:    Option<&str>,
) -> StaffUser {
  s.add_staff(NewStaffUser {
    username:       username.into(),
    email:          format!("{username}@school.test"),
    full_name:      username.into(),
    role,
    assigned_class: class.map(str::to_owned),
  })
  .await
  .unwrap()
}

async fn add_student(
  s:     &SqliteStore,
  code:  &str,
  name:  &str,
  class: &str,
) -> Student {
  s.add_student(NewStudent {
    code:        code.into(),
    full_name:   name.into(),
    class:       class.into(),
    grade_level: 10,
  })
  .await
  .unwrap()
}

fn violation(
  student_id: Uuid,
  points:     i64,
  severity:   Severity,
  date:       &str,
) -> ViolationInput {
  ViolationInput {
    date: date.parse().unwrap(),
    student_id,
    kind: ViolationKind::Discipline,
    description: "late to class".into(),
    severity,
    points,
    handling: HandlingMethod::Warning,
  }
}

fn achievement(student_id: Uuid, recorded_by: Uuid, date: &str) -> NewAchievement {
  NewAchievement {
    date:        date.parse().unwrap(),
    student_id,
    category:    AchievementCategory::Academic,
    description: "math olympiad".into(),
    level:       AchievementLevel::City,
    awarded_by:  "city education office".into(),
    notes:       None,
    recorded_by,
  }
}

fn session(
  student_id:  Uuid,
  recorded_by: Uuid,
  status:      SessionStatus,
  date:        &str,
) -> NewCounselingSession {
  NewCounselingSession {
    date: date.parse().unwrap(),
    student_id,
    purpose: "attendance check-in".into(),
    summary: "discussed attendance".into(),
    follow_up_actions: None,
    status,
    recorded_by,
  }
}

// ─── Staff ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_staff() {
  let s = store().await;

  let staff =
    add_staff(&s, "wira", StaffRole::HomeroomTeacher, Some("10A")).await;
  assert!(staff.active);

  let fetched = s.get_staff(staff.staff_id).await.unwrap().unwrap();
  assert_eq!(fetched.staff_id, staff.staff_id);
  assert_eq!(fetched.role, StaffRole::HomeroomTeacher);
  assert_eq!(fetched.assigned_class.as_deref(), Some("10A"));
}

#[tokio::test]
async fn get_staff_missing_returns_none() {
  let s = store().await;
  assert!(s.get_staff(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_staff_active_only_excludes_deactivated() {
  let s = store().await;
  add_staff(&s, "a", StaffRole::Admin, None).await;
  let gone = add_staff(&s, "b", StaffRole::SubjectTeacher, None).await;

  s.update_staff(gone.staff_id, StaffUpdate {
    active: Some(false),
    ..Default::default()
  })
  .await
  .unwrap()
  .unwrap();

  assert_eq!(s.list_staff(false).await.unwrap().len(), 2);
  let active = s.list_staff(true).await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].username, "a");
}

#[tokio::test]
async fn update_staff_can_clear_assigned_class() {
  let s = store().await;
  let staff =
    add_staff(&s, "wira", StaffRole::HomeroomTeacher, Some("10A")).await;

  let updated = s
    .update_staff(staff.staff_id, StaffUpdate {
      full_name:      Some("Wira S.".into()),
      assigned_class: Some(None),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.full_name, "Wira S.");
  assert!(updated.assigned_class.is_none());
  assert_eq!(updated.role, StaffRole::HomeroomTeacher);
}

#[tokio::test]
async fn update_staff_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_staff(Uuid::new_v4(), StaffUpdate::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_student() {
  let s = store().await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  assert_eq!(student.violation_points, 0);
  assert!(student.active);

  let fetched = s.get_student(student.student_id).await.unwrap().unwrap();
  assert_eq!(fetched.code, "S001");
  assert_eq!(fetched.class, "10A");

  let by_code = s.get_student_by_code("S001").await.unwrap().unwrap();
  assert_eq!(by_code.student_id, student.student_id);
}

#[tokio::test]
async fn duplicate_student_code_rejected() {
  let s = store().await;
  add_student(&s, "S001", "Budi", "10A").await;

  let err = s
    .add_student(NewStudent {
      code:        "S001".into(),
      full_name:   "Someone Else".into(),
      class:       "10B".into(),
      grade_level: 10,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateStudentCode(code) if code == "S001"));
}

#[tokio::test]
async fn list_students_filters_by_class_and_points() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let a = add_student(&s, "S001", "Budi", "10A").await;
  add_student(&s, "S002", "Citra", "10B").await;

  ledger::record_violation(
    &s,
    violation(a.student_id, 60, Severity::Medium, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let in_class = s
    .list_students(&StudentFilter {
      class: Some("10A".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(in_class.len(), 1);
  assert_eq!(in_class[0].code, "S001");

  let flagged = s
    .list_students(&StudentFilter {
      min_points: Some(50),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(flagged.len(), 1);
  assert_eq!(flagged[0].violation_points, 60);
}

#[tokio::test]
async fn update_student_never_touches_points() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 15, Severity::Medium, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let updated = s
    .update_student(student.student_id, StudentUpdate {
      class:       Some("11A".into()),
      grade_level: Some(11),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.class, "11A");
  assert_eq!(updated.grade_level, 11);
  assert_eq!(updated.violation_points, 15);
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_violation_increments_cached_total() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 40, Severity::Heavy, "2024-03-02"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let cached = s
    .get_student(student.student_id)
    .await
    .unwrap()
    .unwrap()
    .violation_points;
  assert_eq!(cached, 45);
  assert_eq!(s.sum_violation_points(student.student_id).await.unwrap(), 45);
  ledger::check_point_total(&s, student.student_id).await.unwrap();
}

#[tokio::test]
async fn record_violation_rejects_nonpositive_points() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  let err = ledger::record_violation(
    &s,
    violation(student.student_id, 0, Severity::Light, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::InvalidPoints(0)));
}

#[tokio::test]
async fn record_violation_rejects_unknown_author() {
  let s = store().await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  let err = ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-01"),
    Uuid::new_v4(),
  )
  .await
  .unwrap_err();
  assert!(
    matches!(err, CoreError::NotFound { entity: Entity::Staff, .. })
  );
}

#[tokio::test]
async fn record_violation_rejects_inactive_author() {
  let s = store().await;
  let staff = add_staff(&s, "gone", StaffRole::SubjectTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  s.update_staff(staff.staff_id, StaffUpdate {
    active: Some(false),
    ..Default::default()
  })
  .await
  .unwrap();

  let err = ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-01"),
    staff.staff_id,
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::InactiveAuthor(id) if id == staff.staff_id));
}

#[tokio::test]
async fn failed_append_leaves_store_unchanged() {
  let s = store().await;
  add_staff(&s, "admin", StaffRole::Admin, None).await;

  let err = s
    .append_violation(tally_core::conduct::NewViolation {
      date:        "2024-03-01".parse().unwrap(),
      student_id:  Uuid::new_v4(),
      kind:        ViolationKind::Discipline,
      description: "phantom".into(),
      severity:    Severity::Light,
      points:      5,
      handling:    HandlingMethod::Warning,
      recorded_by: Uuid::new_v4(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::StudentNotFound(_)));

  // No violation row escaped the rolled-back transaction.
  let all = s.list_violations(&ViolationFilter::default()).await.unwrap();
  assert!(all.is_empty());
}

#[tokio::test]
async fn reconcile_detects_and_repairs_drift() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 15, Severity::Medium, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap();

  // Tamper with the cache to simulate drift.
  s.set_violation_points(student.student_id, 99).await.unwrap();

  let err =
    ledger::check_point_total(&s, student.student_id).await.unwrap_err();
  assert!(matches!(
    err,
    CoreError::PointTotalDrift { cached: 99, computed: 15, .. }
  ));

  let total =
    ledger::reconcile_point_total(&s, student.student_id).await.unwrap();
  assert_eq!(total, 15);
  ledger::check_point_total(&s, student.student_id).await.unwrap();

  // Idempotent.
  let again =
    ledger::reconcile_point_total(&s, student.student_id).await.unwrap();
  assert_eq!(again, 15);
}

#[tokio::test]
async fn reconcile_unknown_student_errors() {
  let s = store().await;
  let err =
    ledger::reconcile_point_total(&s, Uuid::new_v4()).await.unwrap_err();
  assert!(
    matches!(err, CoreError::NotFound { entity: Entity::Student, .. })
  );
}

// ─── Counseling sessions ─────────────────────────────────────────────────────

#[tokio::test]
async fn session_edit_and_status_change() {
  let s = store().await;
  let counselor =
    add_staff(&s, "sari", StaffRole::CounselingTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  let created = s
    .add_session(session(
      student.student_id,
      counselor.staff_id,
      SessionStatus::NeedsFollowUp,
      "2024-03-01",
    ))
    .await
    .unwrap();

  let updated = counseling::update_session(&s, created.session_id, SessionUpdate {
    status:            Some(SessionStatus::Completed),
    follow_up_actions: Some(Some("call parents".into())),
    ..Default::default()
  })
  .await
  .unwrap();
  assert_eq!(updated.status, SessionStatus::Completed);
  assert_eq!(updated.follow_up_actions.as_deref(), Some("call parents"));

  // Doubly-optional clear.
  let cleared = counseling::update_session(&s, created.session_id, SessionUpdate {
    follow_up_actions: Some(None),
    ..Default::default()
  })
  .await
  .unwrap();
  assert!(cleared.follow_up_actions.is_none());
  assert_eq!(cleared.status, SessionStatus::Completed);
}

#[tokio::test]
async fn session_edit_missing_errors() {
  let s = store().await;
  let err = counseling::update_session(&s, Uuid::new_v4(), SessionUpdate::default())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    CoreError::NotFound { entity: Entity::CounselingSession, .. }
  ));
}

// ─── Dashboard stats ─────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_stats_count_everything() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let teacher = add_staff(&s, "t", StaffRole::SubjectTeacher, None).await;
  let a = add_student(&s, "S001", "Budi", "10A").await;
  let b = add_student(&s, "S002", "Citra", "10B").await;

  s.add_achievement(achievement(a.student_id, teacher.staff_id, "2024-03-01"))
    .await
    .unwrap();
  ledger::record_violation(
    &s,
    violation(b.student_id, 5, Severity::Light, "2024-03-02"),
    teacher.staff_id,
  )
  .await
  .unwrap();
  s.add_session(session(
    a.student_id,
    admin.staff_id,
    SessionStatus::Completed,
    "2024-03-03",
  ))
  .await
  .unwrap();

  let stats = engine::dashboard(&s, &Viewer::for_user(&admin))
    .await
    .unwrap()
    .stats;
  assert!(matches!(stats, DashboardStats::Admin {
    active_students:           2,
    active_staff:              2,
    total_achievements:        1,
    total_violations:          1,
    total_counseling_sessions: 1,
  }));
}

#[tokio::test]
async fn subject_teacher_stats_count_own_records_only() {
  let s = store().await;
  let mine = add_staff(&s, "mine", StaffRole::SubjectTeacher, None).await;
  let other = add_staff(&s, "other", StaffRole::SubjectTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  s.add_achievement(achievement(student.student_id, mine.staff_id, "2024-03-01"))
    .await
    .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-02"),
    mine.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-03"),
    other.staff_id,
  )
  .await
  .unwrap();

  let stats = engine::dashboard(&s, &Viewer::for_user(&mine))
    .await
    .unwrap()
    .stats;
  assert!(matches!(stats, DashboardStats::SubjectTeacher { my_records: 2 }));
}

#[tokio::test]
async fn counseling_teacher_stats_count_sessions_and_pending() {
  let s = store().await;
  let mine = add_staff(&s, "mine", StaffRole::CounselingTeacher, None).await;
  let other = add_staff(&s, "other", StaffRole::CounselingTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  s.add_session(session(
    student.student_id,
    mine.staff_id,
    SessionStatus::NeedsFollowUp,
    "2024-03-01",
  ))
  .await
  .unwrap();
  s.add_session(session(
    student.student_id,
    mine.staff_id,
    SessionStatus::Completed,
    "2024-03-02",
  ))
  .await
  .unwrap();
  s.add_session(session(
    student.student_id,
    other.staff_id,
    SessionStatus::NeedsFollowUp,
    "2024-03-03",
  ))
  .await
  .unwrap();

  let stats = engine::dashboard(&s, &Viewer::for_user(&mine))
    .await
    .unwrap()
    .stats;
  assert!(matches!(stats, DashboardStats::CounselingTeacher {
    my_sessions:        2,
    pending_follow_ups: 1,
  }));
}

#[tokio::test]
async fn homeroom_teacher_stats_are_class_scoped() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let homeroom =
    add_staff(&s, "wira", StaffRole::HomeroomTeacher, Some("10A")).await;
  let a = add_student(&s, "S001", "Budi", "10A").await;
  let b = add_student(&s, "S002", "Citra", "10B").await;

  ledger::record_violation(
    &s,
    violation(a.student_id, 5, Severity::Light, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(b.student_id, 5, Severity::Light, "2024-03-02"),
    admin.staff_id,
  )
  .await
  .unwrap();
  s.add_achievement(achievement(a.student_id, admin.staff_id, "2024-03-03"))
    .await
    .unwrap();

  let stats = engine::dashboard(&s, &Viewer::for_user(&homeroom))
    .await
    .unwrap()
    .stats;
  assert!(matches!(stats, DashboardStats::HomeroomTeacher {
    class_students:     1,
    class_violations:   1,
    class_achievements: 1,
  }));
}

// ─── Recent activity ─────────────────────────────────────────────────────────

#[tokio::test]
async fn recent_activity_merges_streams_newest_first() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  s.add_achievement(achievement(student.student_id, admin.staff_id, "2024-03-10"))
    .await
    .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-12"),
    admin.staff_id,
  )
  .await
  .unwrap();
  s.add_session(session(
    student.student_id,
    admin.staff_id,
    SessionStatus::Completed,
    "2024-03-11",
  ))
  .await
  .unwrap();

  let feed = engine::recent_activity(&s, &Viewer::for_user(&admin))
    .await
    .unwrap();
  let kinds: Vec<_> = feed.iter().map(|e| e.kind).collect();
  assert_eq!(kinds, [
    ActivityKind::Violation,
    ActivityKind::Counseling,
    ActivityKind::Achievement,
  ]);
}

#[tokio::test]
async fn recent_activity_author_scoped_for_subject_teacher() {
  let s = store().await;
  let mine = add_staff(&s, "mine", StaffRole::SubjectTeacher, None).await;
  let other = add_staff(&s, "other", StaffRole::SubjectTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-01"),
    mine.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-02"),
    other.staff_id,
  )
  .await
  .unwrap();
  // Counseling never appears in a subject teacher's feed.
  s.add_session(session(
    student.student_id,
    mine.staff_id,
    SessionStatus::Completed,
    "2024-03-03",
  ))
  .await
  .unwrap();

  let feed = engine::recent_activity(&s, &Viewer::for_user(&mine))
    .await
    .unwrap();
  assert_eq!(feed.len(), 1);
  assert_eq!(feed[0].kind, ActivityKind::Violation);
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn high_points_notification_for_admin() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let flagged = add_student(&s, "S001", "Budi", "10A").await;
  let quiet = add_student(&s, "S002", "Citra", "10A").await;

  ledger::record_violation(
    &s,
    violation(flagged.student_id, 40, Severity::Heavy, "2024-01-01"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(flagged.student_id, 35, Severity::Medium, "2024-01-02"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(quiet.student_id, 10, Severity::Light, "2024-01-03"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let notes = engine::notifications(&s, &Viewer::for_user(&admin))
    .await
    .unwrap();
  let points_alerts: Vec<_> = notes
    .iter()
    .filter(|n| matches!(n.kind, NotificationKind::HighViolationPoints { .. }))
    .collect();

  assert_eq!(points_alerts.len(), 1);
  let alert = points_alerts[0];
  assert_eq!(alert.student_id, flagged.student_id);
  assert_eq!(alert.message, "Budi has 75 violation points");
  assert_eq!(alert.priority, Priority::Medium);
}

#[tokio::test]
async fn critical_points_raise_priority_to_high() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 60, Severity::Medium, "2024-01-01"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 45, Severity::Medium, "2024-01-02"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let notes = engine::notifications(&s, &Viewer::for_user(&admin))
    .await
    .unwrap();
  let alert = notes
    .iter()
    .find(|n| matches!(n.kind, NotificationKind::HighViolationPoints { .. }))
    .unwrap();
  assert!(
    matches!(alert.kind, NotificationKind::HighViolationPoints { points: 105 })
  );
  assert_eq!(alert.priority, Priority::High);
}

#[tokio::test]
async fn point_alerts_are_class_scoped_for_homeroom_teachers() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let homeroom =
    add_staff(&s, "wira", StaffRole::HomeroomTeacher, Some("10A")).await;
  let in_class = add_student(&s, "S001", "Budi", "10A").await;
  let elsewhere = add_student(&s, "S002", "Citra", "10B").await;

  for student in [&in_class, &elsewhere] {
    ledger::record_violation(
      &s,
      violation(student.student_id, 55, Severity::Medium, "2024-01-01"),
      admin.staff_id,
    )
    .await
    .unwrap();
  }

  let notes = engine::notifications(&s, &Viewer::for_user(&homeroom))
    .await
    .unwrap();
  let points_alerts: Vec<_> = notes
    .iter()
    .filter(|n| matches!(n.kind, NotificationKind::HighViolationPoints { .. }))
    .collect();
  assert_eq!(points_alerts.len(), 1);
  assert_eq!(points_alerts[0].student_id, in_class.student_id);

  // The admin sees both.
  let admin_notes = engine::notifications(&s, &Viewer::for_user(&admin))
    .await
    .unwrap();
  assert_eq!(
    admin_notes
      .iter()
      .filter(|n| matches!(n.kind, NotificationKind::HighViolationPoints { .. }))
      .count(),
    2
  );
}

#[tokio::test]
async fn follow_up_notifications_are_author_scoped() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let u1 = add_staff(&s, "u1", StaffRole::CounselingTeacher, None).await;
  let u2 = add_staff(&s, "u2", StaffRole::CounselingTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  for counselor in [&u1, &u2] {
    s.add_session(session(
      student.student_id,
      counselor.staff_id,
      SessionStatus::NeedsFollowUp,
      "2024-03-01",
    ))
    .await
    .unwrap();
  }
  // Completed sessions never alert.
  s.add_session(session(
    student.student_id,
    u1.staff_id,
    SessionStatus::Completed,
    "2024-03-02",
  ))
  .await
  .unwrap();

  let mine = engine::notifications(&s, &Viewer::for_user(&u1)).await.unwrap();
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].message, "Follow-up needed for Budi");
  assert_eq!(mine[0].priority, Priority::Medium);
  assert!(matches!(mine[0].kind, NotificationKind::FollowUpNeeded { .. }));

  let all = engine::notifications(&s, &Viewer::for_user(&admin)).await.unwrap();
  assert_eq!(
    all
      .iter()
      .filter(|n| matches!(n.kind, NotificationKind::FollowUpNeeded { .. }))
      .count(),
    2
  );
}

#[tokio::test]
async fn severe_violations_alert_at_high_priority() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let subject = add_staff(&s, "t", StaffRole::SubjectTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  let mut input =
    violation(student.student_id, 40, Severity::Heavy, "2024-03-01");
  input.description = "fighting".into();
  ledger::record_violation(&s, input, admin.staff_id).await.unwrap();

  let notes = engine::notifications(&s, &Viewer::for_user(&admin))
    .await
    .unwrap();
  let severe = notes
    .iter()
    .find(|n| matches!(n.kind, NotificationKind::SevereViolation { .. }))
    .unwrap();
  assert_eq!(severe.message, "Severe violation: fighting");
  assert_eq!(severe.priority, Priority::High);

  // Subject teachers receive no systemic alerts.
  let none = engine::notifications(&s, &Viewer::for_user(&subject))
    .await
    .unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn high_priority_notifications_rank_first() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let counselor = add_staff(&s, "u1", StaffRole::CounselingTeacher, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  // A medium follow-up plus a high severe violation; the high one must
  // sort first even though its generator runs last.
  s.add_session(session(
    student.student_id,
    counselor.staff_id,
    SessionStatus::NeedsFollowUp,
    "2024-03-01",
  ))
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 40, Severity::Heavy, "2024-03-02"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let notes = engine::notifications(&s, &Viewer::for_user(&admin))
    .await
    .unwrap();
  assert!(notes.len() >= 2);
  assert_eq!(notes[0].priority, Priority::High);
  assert!(
    notes.windows(2).all(|pair| pair[0].priority >= pair[1].priority)
  );
}

// ─── Roster import ───────────────────────────────────────────────────────────

#[tokio::test]
async fn roster_import_skips_duplicates_without_aborting() {
  let s = store().await;
  add_student(&s, "S001", "Budi", "10A").await;

  let row = |code: &str, name: &str| RosterRow {
    code:        code.into(),
    full_name:   name.into(),
    class:       "10A".into(),
    grade_level: 10,
  };

  let outcome = roster::import_roster(&s, vec![
    row("S001", "Budi Again"),
    row("S002", "Citra"),
    row("S003", "Dewi"),
  ])
  .await
  .unwrap();

  assert_eq!(outcome.created.len(), 2);
  assert_eq!(outcome.skipped.len(), 1);
  assert_eq!(outcome.skipped[0].row.code, "S001");
  assert!(outcome.skipped[0].reason.contains("already exists"));

  let all = s.list_students(&StudentFilter::default()).await.unwrap();
  assert_eq!(all.len(), 3);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn student_summary_counts_records() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  s.add_achievement(achievement(student.student_id, admin.staff_id, "2024-03-01"))
    .await
    .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 15, Severity::Medium, "2024-03-02"),
    admin.staff_id,
  )
  .await
  .unwrap();
  s.add_session(session(
    student.student_id,
    admin.staff_id,
    SessionStatus::Completed,
    "2024-03-03",
  ))
  .await
  .unwrap();

  let summary = report::student_summary(&s, student.student_id).await.unwrap();
  assert_eq!(summary.achievements, 1);
  assert_eq!(summary.violations, 1);
  assert_eq!(summary.counseling_sessions, 1);
  assert_eq!(summary.violation_points, 15);
}

#[tokio::test]
async fn class_report_windows_on_event_date() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 15, Severity::Medium, "2024-03-05"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 40, Severity::Heavy, "2024-05-01"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let from: NaiveDate = "2024-03-01".parse().unwrap();
  let to: NaiveDate = "2024-03-31".parse().unwrap();
  let report = report::class_report(&s, "10A", from, to).await.unwrap();

  assert_eq!(report.students.len(), 1);
  let entry = &report.students[0];
  assert_eq!(entry.violations, 1);
  assert_eq!(entry.points_in_window, 15);
  // The lifetime cache still carries both.
  assert_eq!(entry.student.violation_points, 55);
}

#[tokio::test]
async fn class_report_unknown_class_errors() {
  let s = store().await;
  let err = report::class_report(
    &s,
    "13Z",
    "2024-03-01".parse().unwrap(),
    "2024-03-31".parse().unwrap(),
  )
  .await
  .unwrap_err();
  assert!(matches!(err, CoreError::EmptyClass(class) if class == "13Z"));
}

// ─── List filters ────────────────────────────────────────────────────────────

#[tokio::test]
async fn violation_list_filters_by_severity_and_window() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let student = add_student(&s, "S001", "Budi", "10A").await;

  ledger::record_violation(
    &s,
    violation(student.student_id, 5, Severity::Light, "2024-03-01"),
    admin.staff_id,
  )
  .await
  .unwrap();
  ledger::record_violation(
    &s,
    violation(student.student_id, 40, Severity::Heavy, "2024-03-02"),
    admin.staff_id,
  )
  .await
  .unwrap();

  let heavy = s
    .list_violations(&ViolationFilter {
      severity: Some(Severity::Heavy),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(heavy.len(), 1);
  assert_eq!(heavy[0].violation.points, 40);
  assert_eq!(heavy[0].student_name, "Budi");
  assert_eq!(heavy[0].student_class, "10A");

  // Both rows were entered just now, so a recent cutoff matches them and
  // a future cutoff matches none.
  let recent = s
    .list_violations(&ViolationFilter {
      created_after: Some(chrono::Utc::now() - chrono::Duration::hours(1)),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(recent.len(), 2);

  let none = s
    .list_violations(&ViolationFilter {
      created_after: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn session_list_filters_by_class() {
  let s = store().await;
  let counselor =
    add_staff(&s, "sari", StaffRole::CounselingTeacher, None).await;
  let a = add_student(&s, "S001", "Budi", "10A").await;
  let b = add_student(&s, "S002", "Citra", "10B").await;

  for student in [&a, &b] {
    s.add_session(session(
      student.student_id,
      counselor.staff_id,
      SessionStatus::Completed,
      "2024-03-01",
    ))
    .await
    .unwrap();
  }

  let in_class = s
    .list_sessions(&SessionFilter {
      class: Some("10A".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(in_class.len(), 1);
  assert_eq!(in_class[0].student_class, "10A");
}

#[tokio::test]
async fn achievement_list_filters_by_student() {
  let s = store().await;
  let admin = add_staff(&s, "admin", StaffRole::Admin, None).await;
  let a = add_student(&s, "S001", "Budi", "10A").await;
  let b = add_student(&s, "S002", "Citra", "10A").await;

  s.add_achievement(achievement(a.student_id, admin.staff_id, "2024-03-01"))
    .await
    .unwrap();
  s.add_achievement(achievement(b.student_id, admin.staff_id, "2024-03-02"))
    .await
    .unwrap();

  let only_a = s
    .list_achievements(&AchievementFilter {
      student_id: Some(a.student_id),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(only_a.len(), 1);
  assert_eq!(only_a[0].achievement.student_id, a.student_id);
}
