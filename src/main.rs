mod access;
mod config;
mod db;
mod emit;
mod error;
mod handout;
mod ipc;
mod loader;
mod params;
mod pdf;
mod pipeline;
mod render;
mod session;

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the protocol, so logs go to stderr.
    let filter = EnvFilter::try_from_env("HANDOUTD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config = config::Config::load();
    let mut state = ipc::AppState::new(config);

    if let Some(path) = state.config.workspace.clone() {
        if let Err(e) = ipc::select_workspace(&mut state, &path) {
            warn!(workspace = %path.display(), error = %e, "could not open startup workspace");
        }
    }
    info!(version = env!("CARGO_PKG_VERSION"), "handoutd ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; answer anonymously.
                warn!(error = %e, "unparseable request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                let _ = writeln!(stdout, "{}", resp);
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
