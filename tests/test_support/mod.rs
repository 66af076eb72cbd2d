#![allow(dead_code)]

use rusqlite::Connection;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub const MISSING_RENDERER: &str = "handoutd-test-missing-renderer";

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub struct Sidecar {
    pub child: Child,
    pub stdin: ChildStdin,
    pub reader: BufReader<ChildStdout>,
}

impl Drop for Sidecar {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawns the daemon with a renderer command that does not exist.
pub fn spawn_sidecar() -> Sidecar {
    spawn_sidecar_with_renderer(MISSING_RENDERER)
}

pub fn spawn_sidecar_with_renderer(renderer: &str) -> Sidecar {
    let exe = env!("CARGO_BIN_EXE_handoutd");
    let mut child = Command::new(exe)
        .env("HANDOUTD_PDF_COMMAND", renderer)
        .env_remove("HANDOUTD_WORKSPACE")
        .env_remove("HANDOUTD_LOGIN_URL")
        .env_remove("HANDOUTD_STUDENT_DASHBOARD_URL")
        .env_remove("HANDOUTD_INSTRUCTOR_DASHBOARD_URL")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn handoutd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    Sidecar {
        child,
        stdin,
        reader: BufReader::new(stdout),
    }
}

impl Sidecar {
    pub fn request(
        &mut self,
        id: &str,
        method: &str,
        params: serde_json::Value,
    ) -> serde_json::Value {
        let payload = json!({
            "id": id,
            "method": method,
            "params": params,
        });
        writeln!(self.stdin, "{}", payload).expect("write request");
        self.stdin.flush().expect("flush request");

        let mut line = String::new();
        self.reader.read_line(&mut line).expect("read response line");
        assert!(!line.trim().is_empty(), "empty response for {}", method);
        let value: serde_json::Value =
            serde_json::from_str(line.trim()).expect("parse response json");
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
        value
    }

    pub fn request_ok(
        &mut self,
        id: &str,
        method: &str,
        params: serde_json::Value,
    ) -> serde_json::Value {
        let value = self.request(id, method, params);
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(true),
            "{} failed: {}",
            method,
            value
        );
        value.get("result").cloned().unwrap_or_default()
    }

    pub fn select_workspace(&mut self, workspace: &Path) {
        let _ = self.request_ok(
            "ws",
            "workspace.select",
            json!({ "path": workspace.to_string_lossy() }),
        );
    }

    pub fn get_handout(
        &mut self,
        id: &str,
        handout_id: &str,
        session: serde_json::Value,
        query: serde_json::Value,
    ) -> serde_json::Value {
        self.request_ok(
            id,
            "handouts.get",
            json!({ "handoutId": handout_id, "session": session, "query": query }),
        )
    }
}

pub fn open_workspace_db(workspace: &Path) -> Connection {
    Connection::open(workspace.join("handouts.sqlite3")).expect("open workspace db")
}

/// Ana (1) is enrolled in Life Skills batch 5, taught by Ben (2).
/// Cara (3) only has a pending enrollment; Dev (4) teaches Algebra batch 6.
/// Eve (5) completed Personal Development batch 7.
pub fn seed_portal(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO users(id, email, first_name, last_name) VALUES
            (1, 'ana@example.edu', 'Ana', 'Lopez'),
            (2, 'ben@example.edu', 'Ben', 'Okafor'),
            (3, 'cara@example.edu', 'Cara', 'Nguyen'),
            (4, 'dev@example.edu', 'Dev', 'Patel'),
            (5, 'eve@example.edu', 'Eve', 'Smith');
         INSERT INTO courses(id, title) VALUES
            (10, 'Life Skills for Young Adults'),
            (11, 'Algebra I'),
            (12, 'Personal Development Seminar'),
            (13, 'life skills (archived)');
         INSERT INTO class_batches(id, course_id, instructor_id) VALUES
            (5, 10, 2),
            (6, 11, 4),
            (7, 12, 2),
            (8, 13, 4);
         INSERT INTO enrollments(student_id, batch_id, status) VALUES
            (1, 5, 'active'),
            (3, 5, 'pending'),
            (3, 6, 'active'),
            (3, 8, 'active'),
            (5, 7, 'completed');",
    )
    .expect("seed portal data");
}

pub fn student(user_id: i64) -> serde_json::Value {
    json!({ "userId": user_id, "userRole": "student" })
}

pub fn instructor(user_id: i64) -> serde_json::Value {
    json!({ "userId": user_id, "userRole": "instructor" })
}

pub fn body(result: &serde_json::Value) -> &str {
    result
        .get("body")
        .and_then(|v| v.as_str())
        .expect("response body")
}

pub fn header<'a>(result: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    result
        .get("headers")
        .and_then(|h| h.get(name))
        .and_then(|v| v.as_str())
}

pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
