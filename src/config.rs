use std::{env, path::PathBuf};

use tracing::{info, warn};

use crate::session::Role;

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: Option<PathBuf>,
    pub login_url: String,
    pub student_dashboard_url: String,
    pub instructor_dashboard_url: String,
    pub pdf_command: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            workspace: var("HANDOUTD_WORKSPACE").map(PathBuf::from),
            login_url: try_load("HANDOUTD_LOGIN_URL", "login.php"),
            student_dashboard_url: try_load(
                "HANDOUTD_STUDENT_DASHBOARD_URL",
                "student_dashboard.php",
            ),
            instructor_dashboard_url: try_load(
                "HANDOUTD_INSTRUCTOR_DASHBOARD_URL",
                "instructor_dashboard.php",
            ),
            pdf_command: try_load("HANDOUTD_PDF_COMMAND", "wkhtmltopdf"),
        }
    }

    pub fn dashboard_url(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.student_dashboard_url,
            Role::Instructor => &self.instructor_dashboard_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: None,
            login_url: "login.php".to_string(),
            student_dashboard_url: "student_dashboard.php".to_string(),
            instructor_dashboard_url: "instructor_dashboard.php".to_string(),
            pdf_command: "wkhtmltopdf".to_string(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        Ok(_) => {
            warn!("Environment variable {key} is empty, ignoring");
            None
        }
        Err(_) => None,
    }
}

fn try_load(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
