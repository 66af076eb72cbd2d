use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "student" => Some(Role::Student),
            "instructor" => Some(Role::Instructor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
        }
    }
}

/// Session state as handed over by the portal's session store. The display
/// fields are cached copies used only when the database cannot answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<i64>,
    pub user_role: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
}

impl Session {
    pub fn from_json(raw: Option<&serde_json::Value>) -> Session {
        let Some(raw) = raw.filter(|v| v.is_object()) else {
            return Session::default();
        };
        let text = |key: &str| {
            raw.get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        Session {
            user_id: raw.get("userId").and_then(user_id_value),
            user_role: text("userRole"),
            email: text("email"),
            first_name: text("firstName"),
            last_name: text("lastName"),
            instructor_name: text("instructorName"),
            instructor_email: text("instructorEmail"),
        }
    }
}

// Session stores hand ids back as either numbers or numeric strings.
fn user_id_value(v: &serde_json::Value) -> Option<i64> {
    match v {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Authenticated principal admitted by the session gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub role: Role,
}

/// Admits a session carrying a user id and an allowed role.
pub fn authenticate(session: &Session) -> Option<Principal> {
    let user_id = session.user_id?;
    let role = session.user_role.as_deref().and_then(Role::parse)?;
    Some(Principal { user_id, role })
}
