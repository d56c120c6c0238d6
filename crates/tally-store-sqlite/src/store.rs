//! [`SqliteStore`] — the SQLite implementation of [`ConductStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tally_core::{
  conduct::{
    Achievement, CounselingSession, NewAchievement, NewCounselingSession,
    NewViolation, SessionUpdate, Violation,
  },
  staff::{NewStaffUser, StaffUpdate, StaffUser},
  store::{
    AchievementFilter, AchievementRow, ConductStore, SessionFilter,
    SessionRow, StudentFilter, ViolationFilter, ViolationRow,
  },
  student::{NewStudent, Student, StudentUpdate},
};

use crate::{
  Error, Result,
  encode::{
    RawAchievement, RawSession, RawStaff, RawStudent, RawViolation,
    encode_category, encode_date, encode_dt, encode_handling, encode_level,
    encode_role, encode_severity, encode_status, encode_uuid,
    encode_violation_kind,
  },
  schema::SCHEMA,
};

// ─── Column lists ────────────────────────────────────────────────────────────

const STAFF_COLS: &str =
  "staff_id, username, email, full_name, role, assigned_class, active, created_at";
const STUDENT_COLS: &str =
  "student_id, code, full_name, class, grade_level, violation_points, active, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tally conduct store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements run serialized on one connection, so the multi-statement
/// violation append commits as one unit.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ConductStore impl ───────────────────────────────────────────────────────

impl ConductStore for SqliteStore {
  type Error = Error;

  // ── Staff ─────────────────────────────────────────────────────────────────

  async fn add_staff(&self, input: NewStaffUser) -> Result<StaffUser> {
    let staff = StaffUser {
      staff_id:       Uuid::new_v4(),
      username:       input.username,
      email:          input.email,
      full_name:      input.full_name,
      role:           input.role,
      assigned_class: input.assigned_class,
      active:         true,
      created_at:     Utc::now(),
    };

    let id_str   = encode_uuid(staff.staff_id);
    let at_str   = encode_dt(staff.created_at);
    let role_str = encode_role(staff.role).to_owned();
    let username = staff.username.clone();
    let email    = staff.email.clone();
    let name     = staff.full_name.clone();
    let class    = staff.assigned_class.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO staff (staff_id, username, email, full_name, role,
                              assigned_class, active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7)",
          rusqlite::params![id_str, username, email, name, role_str, class, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(staff)
  }

  async fn get_staff(&self, id: Uuid) -> Result<Option<StaffUser>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STAFF_COLS} FROM staff WHERE staff_id = ?1"),
            rusqlite::params![id_str],
            |row| {
              Ok(RawStaff {
                staff_id:       row.get(0)?,
                username:       row.get(1)?,
                email:          row.get(2)?,
                full_name:      row.get(3)?,
                role:           row.get(4)?,
                assigned_class: row.get(5)?,
                active:         row.get(6)?,
                created_at:     row.get(7)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  async fn list_staff(&self, active_only: bool) -> Result<Vec<StaffUser>> {
    let active_flag = i64::from(active_only);

    let raws: Vec<RawStaff> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STAFF_COLS} FROM staff
           WHERE (?1 = 0 OR active = 1)
           ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![active_flag], |row| {
            Ok(RawStaff {
              staff_id:       row.get(0)?,
              username:       row.get(1)?,
              email:          row.get(2)?,
              full_name:      row.get(3)?,
              role:           row.get(4)?,
              assigned_class: row.get(5)?,
              active:         row.get(6)?,
              created_at:     row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStaff::into_staff).collect()
  }

  async fn update_staff(
    &self,
    id:     Uuid,
    update: StaffUpdate,
  ) -> Result<Option<StaffUser>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(
            &format!("SELECT {STAFF_COLS} FROM staff WHERE staff_id = ?1"),
            rusqlite::params![id_str],
            |row| {
              Ok(RawStaff {
                staff_id:       row.get(0)?,
                username:       row.get(1)?,
                email:          row.get(2)?,
                full_name:      row.get(3)?,
                role:           row.get(4)?,
                assigned_class: row.get(5)?,
                active:         row.get(6)?,
                created_at:     row.get(7)?,
              })
            },
          )
          .optional()?;

        let Some(mut raw) = existing else { return Ok(None) };

        if let Some(name) = update.full_name {
          raw.full_name = name;
        }
        if let Some(role) = update.role {
          raw.role = encode_role(role).to_owned();
        }
        if let Some(class) = update.assigned_class {
          raw.assigned_class = class;
        }
        if let Some(active) = update.active {
          raw.active = i64::from(active);
        }

        conn.execute(
          "UPDATE staff
           SET full_name = ?2, role = ?3, assigned_class = ?4, active = ?5
           WHERE staff_id = ?1",
          rusqlite::params![
            raw.staff_id,
            raw.full_name,
            raw.role,
            raw.assigned_class,
            raw.active,
          ],
        )?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  // ── Students ──────────────────────────────────────────────────────────────

  async fn add_student(&self, input: NewStudent) -> Result<Student> {
    let student = Student {
      student_id:       Uuid::new_v4(),
      code:             input.code,
      full_name:        input.full_name,
      class:            input.class,
      grade_level:      input.grade_level,
      violation_points: 0,
      active:           true,
      created_at:       Utc::now(),
    };

    let id_str = encode_uuid(student.student_id);
    let at_str = encode_dt(student.created_at);
    let code   = student.code.clone();
    let name   = student.full_name.clone();
    let class  = student.class.clone();
    let grade  = i64::from(student.grade_level);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let taken: bool = conn
          .query_row(
            "SELECT 1 FROM students WHERE code = ?1",
            rusqlite::params![code],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(false);
        }
        conn.execute(
          "INSERT INTO students (student_id, code, full_name, class,
                                 grade_level, violation_points, active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, 0, 1, ?6)",
          rusqlite::params![id_str, code, name, class, grade, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateStudentCode(student.code));
    }
    Ok(student)
  }

  async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STUDENT_COLS} FROM students WHERE student_id = ?1"),
            rusqlite::params![id_str],
            map_student_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn get_student_by_code(&self, code: &str) -> Result<Option<Student>> {
    let code = code.to_owned();

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STUDENT_COLS} FROM students WHERE code = ?1"),
            rusqlite::params![code],
            map_student_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
    let class       = filter.class.clone();
    let active_flag = i64::from(filter.active_only);
    let min_points  = filter.min_points;

    let raws: Vec<RawStudent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STUDENT_COLS} FROM students
           WHERE (?1 IS NULL OR class = ?1)
             AND (?2 = 0 OR active = 1)
             AND (?3 IS NULL OR violation_points >= ?3)
           ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![class, active_flag, min_points],
            map_student_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn update_student(
    &self,
    id:     Uuid,
    update: StudentUpdate,
  ) -> Result<Option<Student>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(
            &format!("SELECT {STUDENT_COLS} FROM students WHERE student_id = ?1"),
            rusqlite::params![id_str],
            map_student_row,
          )
          .optional()?;

        let Some(mut raw) = existing else { return Ok(None) };

        if let Some(name) = update.full_name {
          raw.full_name = name;
        }
        if let Some(class) = update.class {
          raw.class = class;
        }
        if let Some(grade) = update.grade_level {
          raw.grade_level = i64::from(grade);
        }
        if let Some(active) = update.active {
          raw.active = i64::from(active);
        }

        // violation_points is deliberately not touched here.
        conn.execute(
          "UPDATE students
           SET full_name = ?2, class = ?3, grade_level = ?4, active = ?5
           WHERE student_id = ?1",
          rusqlite::params![
            raw.student_id,
            raw.full_name,
            raw.class,
            raw.grade_level,
            raw.active,
          ],
        )?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  // ── Ledger primitives ─────────────────────────────────────────────────────

  async fn append_violation(&self, input: NewViolation) -> Result<Violation> {
    let violation = Violation {
      violation_id: Uuid::new_v4(),
      date:         input.date,
      student_id:   input.student_id,
      kind:         input.kind,
      description:  input.description,
      severity:     input.severity,
      points:       input.points,
      handling:     input.handling,
      recorded_by:  input.recorded_by,
      created_at:   Utc::now(),
    };

    let id_str       = encode_uuid(violation.violation_id);
    let date_str     = encode_date(violation.date);
    let student_str  = encode_uuid(violation.student_id);
    let kind_str     = encode_violation_kind(violation.kind).to_owned();
    let description  = violation.description.clone();
    let severity_str = encode_severity(violation.severity).to_owned();
    let points       = violation.points;
    let handling_str = encode_handling(violation.handling).to_owned();
    let author_str   = encode_uuid(violation.recorded_by);
    let at_str       = encode_dt(violation.created_at);

    let applied: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Relative increment: no read-modify-write, so concurrent appends
        // for the same student cannot lose updates. Zero rows updated
        // means the student does not exist; the transaction rolls back
        // with no violation row inserted.
        let updated = tx.execute(
          "UPDATE students SET violation_points = violation_points + ?1
           WHERE student_id = ?2",
          rusqlite::params![points, student_str],
        )?;
        if updated == 0 {
          return Ok(false);
        }

        tx.execute(
          "INSERT INTO violations (violation_id, date, student_id, kind,
                                   description, severity, points, handling,
                                   recorded_by, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            date_str,
            student_str,
            kind_str,
            description,
            severity_str,
            points,
            handling_str,
            author_str,
            at_str,
          ],
        )?;

        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !applied {
      return Err(Error::StudentNotFound(violation.student_id));
    }
    Ok(violation)
  }

  async fn sum_violation_points(&self, student_id: Uuid) -> Result<i64> {
    let id_str = encode_uuid(student_id);

    let total: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COALESCE(SUM(points), 0) FROM violations WHERE student_id = ?1",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(total)
  }

  async fn set_violation_points(
    &self,
    student_id: Uuid,
    total:      i64,
  ) -> Result<bool> {
    let id_str = encode_uuid(student_id);

    let updated: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE students SET violation_points = ?1 WHERE student_id = ?2",
          rusqlite::params![total, id_str],
        )?)
      })
      .await?;

    Ok(updated > 0)
  }

  async fn list_violations(
    &self,
    filter: &ViolationFilter,
  ) -> Result<Vec<ViolationRow>> {
    let student  = filter.student_id.map(encode_uuid);
    let author   = filter.recorded_by.map(encode_uuid);
    let class    = filter.class.clone();
    let severity = filter.severity.map(|s| encode_severity(s).to_owned());
    let after    = filter.created_after.map(encode_dt);

    let raws: Vec<RawViolation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT v.violation_id, v.date, v.student_id, v.kind, v.description,
                  v.severity, v.points, v.handling, v.recorded_by, v.created_at,
                  st.full_name, st.class
           FROM violations v
           JOIN students st ON st.student_id = v.student_id
           WHERE (?1 IS NULL OR v.student_id = ?1)
             AND (?2 IS NULL OR v.recorded_by = ?2)
             AND (?3 IS NULL OR st.class = ?3)
             AND (?4 IS NULL OR v.severity = ?4)
             AND (?5 IS NULL OR v.created_at >= ?5)
           ORDER BY v.created_at DESC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![student, author, class, severity, after],
            |row| {
              Ok(RawViolation {
                violation_id:  row.get(0)?,
                date:          row.get(1)?,
                student_id:    row.get(2)?,
                kind:          row.get(3)?,
                description:   row.get(4)?,
                severity:      row.get(5)?,
                points:        row.get(6)?,
                handling:      row.get(7)?,
                recorded_by:   row.get(8)?,
                created_at:    row.get(9)?,
                student_name:  row.get(10)?,
                student_class: row.get(11)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawViolation::into_row).collect()
  }

  // ── Achievements ──────────────────────────────────────────────────────────

  async fn add_achievement(&self, input: NewAchievement) -> Result<Achievement> {
    let achievement = Achievement {
      achievement_id: Uuid::new_v4(),
      date:           input.date,
      student_id:     input.student_id,
      category:       input.category,
      description:    input.description,
      level:          input.level,
      awarded_by:     input.awarded_by,
      notes:          input.notes,
      recorded_by:    input.recorded_by,
      created_at:     Utc::now(),
    };

    let id_str       = encode_uuid(achievement.achievement_id);
    let date_str     = encode_date(achievement.date);
    let student_str  = encode_uuid(achievement.student_id);
    let category_str = encode_category(achievement.category).to_owned();
    let description  = achievement.description.clone();
    let level_str    = encode_level(achievement.level).to_owned();
    let awarded_by   = achievement.awarded_by.clone();
    let notes        = achievement.notes.clone();
    let author_str   = encode_uuid(achievement.recorded_by);
    let at_str       = encode_dt(achievement.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO achievements (achievement_id, date, student_id, category,
                                     description, level, awarded_by, notes,
                                     recorded_by, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            date_str,
            student_str,
            category_str,
            description,
            level_str,
            awarded_by,
            notes,
            author_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(achievement)
  }

  async fn list_achievements(
    &self,
    filter: &AchievementFilter,
  ) -> Result<Vec<AchievementRow>> {
    let student = filter.student_id.map(encode_uuid);
    let author  = filter.recorded_by.map(encode_uuid);
    let class   = filter.class.clone();

    let raws: Vec<RawAchievement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT a.achievement_id, a.date, a.student_id, a.category,
                  a.description, a.level, a.awarded_by, a.notes,
                  a.recorded_by, a.created_at, st.full_name, st.class
           FROM achievements a
           JOIN students st ON st.student_id = a.student_id
           WHERE (?1 IS NULL OR a.student_id = ?1)
             AND (?2 IS NULL OR a.recorded_by = ?2)
             AND (?3 IS NULL OR st.class = ?3)
           ORDER BY a.created_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![student, author, class], |row| {
            Ok(RawAchievement {
              achievement_id: row.get(0)?,
              date:           row.get(1)?,
              student_id:     row.get(2)?,
              category:       row.get(3)?,
              description:    row.get(4)?,
              level:          row.get(5)?,
              awarded_by:     row.get(6)?,
              notes:          row.get(7)?,
              recorded_by:    row.get(8)?,
              created_at:     row.get(9)?,
              student_name:   row.get(10)?,
              student_class:  row.get(11)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAchievement::into_row).collect()
  }

  // ── Counseling sessions ───────────────────────────────────────────────────

  async fn add_session(
    &self,
    input: NewCounselingSession,
  ) -> Result<CounselingSession> {
    let session = CounselingSession {
      session_id:        Uuid::new_v4(),
      date:              input.date,
      student_id:        input.student_id,
      purpose:           input.purpose,
      summary:           input.summary,
      follow_up_actions: input.follow_up_actions,
      status:            input.status,
      recorded_by:       input.recorded_by,
      created_at:        Utc::now(),
    };

    let id_str      = encode_uuid(session.session_id);
    let date_str    = encode_date(session.date);
    let student_str = encode_uuid(session.student_id);
    let purpose     = session.purpose.clone();
    let summary     = session.summary.clone();
    let follow_up   = session.follow_up_actions.clone();
    let status_str  = encode_status(session.status).to_owned();
    let author_str  = encode_uuid(session.recorded_by);
    let at_str      = encode_dt(session.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO counseling_sessions (session_id, date, student_id,
                                            purpose, summary, follow_up_actions,
                                            status, recorded_by, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            date_str,
            student_str,
            purpose,
            summary,
            follow_up,
            status_str,
            author_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(session)
  }

  async fn get_session(&self, id: Uuid) -> Result<Option<CounselingSession>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT s.session_id, s.date, s.student_id, s.purpose, s.summary,
                    s.follow_up_actions, s.status, s.recorded_by, s.created_at,
                    st.full_name, st.class
             FROM counseling_sessions s
             JOIN students st ON st.student_id = s.student_id
             WHERE s.session_id = ?1",
            rusqlite::params![id_str],
            map_session_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn update_session(
    &self,
    id:     Uuid,
    update: SessionUpdate,
  ) -> Result<Option<CounselingSession>> {
    let id_str = encode_uuid(id);
    let status = update.status.map(|s| encode_status(s).to_owned());

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        let existing = conn
          .query_row(
            "SELECT s.session_id, s.date, s.student_id, s.purpose, s.summary,
                    s.follow_up_actions, s.status, s.recorded_by, s.created_at,
                    st.full_name, st.class
             FROM counseling_sessions s
             JOIN students st ON st.student_id = s.student_id
             WHERE s.session_id = ?1",
            rusqlite::params![id_str],
            map_session_row,
          )
          .optional()?;

        let Some(mut raw) = existing else { return Ok(None) };

        if let Some(purpose) = update.purpose {
          raw.purpose = purpose;
        }
        if let Some(summary) = update.summary {
          raw.summary = summary;
        }
        if let Some(follow_up) = update.follow_up_actions {
          raw.follow_up_actions = follow_up;
        }
        if let Some(status) = status {
          raw.status = status;
        }

        conn.execute(
          "UPDATE counseling_sessions
           SET purpose = ?2, summary = ?3, follow_up_actions = ?4, status = ?5
           WHERE session_id = ?1",
          rusqlite::params![
            raw.session_id,
            raw.purpose,
            raw.summary,
            raw.follow_up_actions,
            raw.status,
          ],
        )?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn list_sessions(&self, filter: &SessionFilter) -> Result<Vec<SessionRow>> {
    let student = filter.student_id.map(encode_uuid);
    let author  = filter.recorded_by.map(encode_uuid);
    let class   = filter.class.clone();
    let status  = filter.status.map(|s| encode_status(s).to_owned());

    let raws: Vec<RawSession> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT s.session_id, s.date, s.student_id, s.purpose, s.summary,
                  s.follow_up_actions, s.status, s.recorded_by, s.created_at,
                  st.full_name, st.class
           FROM counseling_sessions s
           JOIN students st ON st.student_id = s.student_id
           WHERE (?1 IS NULL OR s.student_id = ?1)
             AND (?2 IS NULL OR s.recorded_by = ?2)
             AND (?3 IS NULL OR st.class = ?3)
             AND (?4 IS NULL OR s.status = ?4)
           ORDER BY s.created_at DESC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![student, author, class, status],
            map_session_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSession::into_row).collect()
  }
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

fn map_student_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawStudent> {
  Ok(RawStudent {
    student_id:       row.get(0)?,
    code:             row.get(1)?,
    full_name:        row.get(2)?,
    class:            row.get(3)?,
    grade_level:      row.get(4)?,
    violation_points: row.get(5)?,
    active:           row.get(6)?,
    created_at:       row.get(7)?,
  })
}

fn map_session_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSession> {
  Ok(RawSession {
    session_id:        row.get(0)?,
    date:              row.get(1)?,
    student_id:        row.get(2)?,
    purpose:           row.get(3)?,
    summary:           row.get(4)?,
    follow_up_actions: row.get(5)?,
    status:            row.get(6)?,
    recorded_by:       row.get(7)?,
    created_at:        row.get(8)?,
    student_name:      row.get(9)?,
    student_class:     row.get(10)?,
  })
}
