use rusqlite::Connection;
use tracing::{debug, warn};

use crate::db::{self, UserRow};
use crate::error::HandoutError;
use crate::session::Session;

pub const PLACEHOLDER_INSTRUCTOR_NAME: &str = "Your Instructor";
pub const PLACEHOLDER_INSTRUCTOR_EMAIL: &str = "instructor@lifeskills.edu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDisplay {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserDisplay {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorDisplay {
    pub name: String,
    pub email: String,
}

/// Display fields for the signed-in user. Falls back to the session copies,
/// then to empty strings.
pub fn load_user(conn: Option<&Connection>, user_id: i64, session: &Session) -> UserDisplay {
    match lookup(conn, |c| db::find_user(c, user_id)) {
        Ok(row) => UserDisplay {
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
        },
        Err(e) => {
            warn!(user_id, error = %e, "user lookup failed, using session values");
            UserDisplay {
                email: session.email.clone().unwrap_or_default(),
                first_name: session.first_name.clone().unwrap_or_default(),
                last_name: session.last_name.clone().unwrap_or_default(),
            }
        }
    }
}

/// Instructor of the class batch named by `class_id`. Falls back to the
/// session copies, then to the placeholders.
pub fn load_instructor(
    conn: Option<&Connection>,
    class_id: Option<i64>,
    session: &Session,
) -> InstructorDisplay {
    let found = match class_id {
        Some(id) => lookup(conn, |c| db::find_batch_instructor(c, id)),
        None => Err(HandoutError::DataUnavailable("no class context".into())),
    };

    match found {
        Ok(row) => InstructorDisplay {
            name: row.full_name(),
            email: row.email,
        },
        Err(e) => {
            debug!(?class_id, error = %e, "instructor lookup fell back");
            InstructorDisplay {
                name: session
                    .instructor_name
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_INSTRUCTOR_NAME.to_string()),
                email: session
                    .instructor_email
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_INSTRUCTOR_EMAIL.to_string()),
            }
        }
    }
}

fn lookup<F>(conn: Option<&Connection>, query: F) -> Result<UserRow, HandoutError>
where
    F: FnOnce(&Connection) -> rusqlite::Result<Option<UserRow>>,
{
    let conn =
        conn.ok_or_else(|| HandoutError::DataUnavailable("no workspace selected".into()))?;
    query(conn)?.ok_or_else(|| HandoutError::DataUnavailable("no matching row".into()))
}
