use rusqlite::Connection;
use tracing::{debug, warn};

use crate::db;
use crate::error::HandoutError;
use crate::session::{Principal, Role};

/// Course titles containing either phrase unlock the handouts.
pub const COURSE_MARKERS: [&str; 2] = ["Life Skills", "Personal Development"];

/// Qualifying enrollments (students) or teaching assignments (instructors).
/// A missing database or a failed query counts as zero.
pub fn access_count(conn: Option<&Connection>, principal: Principal) -> i64 {
    let Some(conn) = conn else {
        warn!(user_id = principal.user_id, "no workspace selected, denying access");
        return 0;
    };

    let counted = match principal.role {
        Role::Student => db::count_student_access(conn, principal.user_id, COURSE_MARKERS),
        Role::Instructor => db::count_instructor_access(conn, principal.user_id, COURSE_MARKERS),
    };

    match counted {
        Ok(n) => n,
        Err(e) => {
            warn!(
                user_id = principal.user_id,
                role = principal.role.as_str(),
                error = %e,
                "access query failed, denying access"
            );
            0
        }
    }
}

pub fn check_access(conn: Option<&Connection>, principal: Principal) -> Result<(), HandoutError> {
    let count = access_count(conn, principal);
    debug!(user_id = principal.user_id, count, "access count");
    if count > 0 {
        Ok(())
    } else {
        Err(HandoutError::denied(principal.user_id, principal.role))
    }
}
