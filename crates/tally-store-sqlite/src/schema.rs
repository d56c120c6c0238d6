//! SQL schema for the Tally SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS staff (
    staff_id       TEXT PRIMARY KEY,
    username       TEXT NOT NULL UNIQUE,
    email          TEXT NOT NULL UNIQUE,
    full_name      TEXT NOT NULL,
    role           TEXT NOT NULL,   -- snake_case StaffRole
    assigned_class TEXT,            -- only meaningful for homeroom teachers
    active         INTEGER NOT NULL DEFAULT 1,
    created_at     TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS students (
    student_id       TEXT PRIMARY KEY,
    code             TEXT NOT NULL UNIQUE,
    full_name        TEXT NOT NULL,
    class            TEXT NOT NULL,
    grade_level      INTEGER NOT NULL,
    -- Derived cache of SUM(violations.points); written only by the atomic
    -- violation append and by reconciliation.
    violation_points INTEGER NOT NULL DEFAULT 0,
    active           INTEGER NOT NULL DEFAULT 1,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS achievements (
    achievement_id TEXT PRIMARY KEY,
    date           TEXT NOT NULL,   -- event date, YYYY-MM-DD
    student_id     TEXT NOT NULL REFERENCES students(student_id),
    category       TEXT NOT NULL,
    description    TEXT NOT NULL,
    level          TEXT NOT NULL,
    awarded_by     TEXT NOT NULL,
    notes          TEXT,
    recorded_by    TEXT NOT NULL REFERENCES staff(staff_id),
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS violations (
    violation_id TEXT PRIMARY KEY,
    date         TEXT NOT NULL,
    student_id   TEXT NOT NULL REFERENCES students(student_id),
    kind         TEXT NOT NULL,
    description  TEXT NOT NULL,
    severity     TEXT NOT NULL,
    points       INTEGER NOT NULL CHECK (points >= 1),
    handling     TEXT NOT NULL,
    recorded_by  TEXT NOT NULL REFERENCES staff(staff_id),
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS counseling_sessions (
    session_id        TEXT PRIMARY KEY,
    date              TEXT NOT NULL,
    student_id        TEXT NOT NULL REFERENCES students(student_id),
    purpose           TEXT NOT NULL,
    summary           TEXT NOT NULL,
    follow_up_actions TEXT,
    status            TEXT NOT NULL,
    recorded_by       TEXT NOT NULL REFERENCES staff(staff_id),
    created_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS achievements_student_idx ON achievements(student_id);
CREATE INDEX IF NOT EXISTS violations_student_idx   ON violations(student_id);
CREATE INDEX IF NOT EXISTS violations_severity_idx  ON violations(severity);
CREATE INDEX IF NOT EXISTS sessions_student_idx     ON counseling_sessions(student_id);
CREATE INDEX IF NOT EXISTS sessions_status_idx      ON counseling_sessions(status);
CREATE INDEX IF NOT EXISTS students_class_idx       ON students(class);

PRAGMA user_version = 1;
";
