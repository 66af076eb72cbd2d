use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

pub const DB_FILE: &str = "handouts.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users(
            id INTEGER PRIMARY KEY,
            email TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses(
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS class_batches(
            id INTEGER PRIMARY KEY,
            course_id INTEGER NOT NULL,
            instructor_id INTEGER NOT NULL,
            FOREIGN KEY(course_id) REFERENCES courses(id),
            FOREIGN KEY(instructor_id) REFERENCES users(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_class_batches_instructor ON class_batches(instructor_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS enrollments(
            id INTEGER PRIMARY KEY,
            student_id INTEGER NOT NULL,
            batch_id INTEGER NOT NULL,
            status TEXT NOT NULL,
            FOREIGN KEY(student_id) REFERENCES users(id),
            FOREIGN KEY(batch_id) REFERENCES class_batches(id)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_enrollments_student ON enrollments(student_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_enrollments_batch ON enrollments(batch_id)",
        [],
    )?;

    Ok(conn)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Enrollments of `student_id` that are active or completed in a course whose
/// title contains one of `markers` (case-sensitive).
pub fn count_student_access(
    conn: &Connection,
    student_id: i64,
    markers: [&str; 2],
) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*)
         FROM enrollments e
         JOIN class_batches cb ON cb.id = e.batch_id
         JOIN courses c ON c.id = cb.course_id
         WHERE e.student_id = ?1
           AND e.status IN ('active', 'completed')
           AND (instr(c.title, ?2) > 0 OR instr(c.title, ?3) > 0)",
    )?;
    stmt.query_row((student_id, markers[0], markers[1]), |r| r.get(0))
}

/// Class batches taught by `instructor_id` in a qualifying course.
pub fn count_instructor_access(
    conn: &Connection,
    instructor_id: i64,
    markers: [&str; 2],
) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare(
        "SELECT COUNT(*)
         FROM class_batches cb
         JOIN courses c ON c.id = cb.course_id
         WHERE cb.instructor_id = ?1
           AND (instr(c.title, ?2) > 0 OR instr(c.title, ?3) > 0)",
    )?;
    stmt.query_row((instructor_id, markers[0], markers[1]), |r| r.get(0))
}

pub fn find_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT email, first_name, last_name FROM users WHERE id = ?")?;
    stmt.query_row([user_id], user_row).optional()
}

pub fn find_batch_instructor(
    conn: &Connection,
    batch_id: i64,
) -> rusqlite::Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT u.email, u.first_name, u.last_name
         FROM class_batches cb
         JOIN users u ON u.id = cb.instructor_id
         WHERE cb.id = ?",
    )?;
    stmt.query_row([batch_id], user_row).optional()
}

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        email: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
    })
}
