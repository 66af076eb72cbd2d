use thiserror::Error;

use crate::session::Role;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF renderer `{command}` is not available")]
    Unavailable { command: String },

    #[error("failed to start PDF renderer: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("failed to send HTML to PDF renderer: {0}")]
    Input(std::io::Error),

    #[error("failed to write PDF to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("PDF renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("PDF renderer produced no PDF output")]
    InvalidOutput,
}

/// Why a handout request stopped short of rendering content.
#[derive(Error, Debug)]
pub enum HandoutError {
    #[error("no authenticated session with an allowed role")]
    AuthenticationMissing,

    #[error("{role} {user_id} has no qualifying course")]
    AuthorizationDenied { user_id: i64, role: &'static str },

    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error(transparent)]
    Pdf(#[from] PdfError),
}

impl HandoutError {
    pub fn denied(user_id: i64, role: Role) -> Self {
        HandoutError::AuthorizationDenied {
            user_id,
            role: role.as_str(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HandoutError::AuthenticationMissing => "authentication_missing",
            HandoutError::AuthorizationDenied { .. } => "authorization_denied",
            HandoutError::DataUnavailable(_) => "data_unavailable",
            HandoutError::Pdf(PdfError::Unavailable { .. }) => "pdf_unavailable",
            HandoutError::Pdf(_) => "pdf_construction_failed",
        }
    }
}

impl From<rusqlite::Error> for HandoutError {
    fn from(e: rusqlite::Error) -> Self {
        HandoutError::DataUnavailable(e.to_string())
    }
}
