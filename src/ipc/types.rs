use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

use crate::config::Config;
use crate::pdf::CommandPdfEngine;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub config: Config,
    pub pdf: CommandPdfEngine,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pdf = CommandPdfEngine::new(config.pdf_command.clone());
        Self {
            workspace: None,
            db: None,
            config,
            pdf,
        }
    }
}
