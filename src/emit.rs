use chrono::NaiveDate;

use crate::error::HandoutError;
use crate::handout::Handout;
use crate::render::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Html,
    Pdf,
    Redirect,
    ErrorPage,
}

impl ResponseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseKind::Html => "html",
            ResponseKind::Pdf => "pdf",
            ResponseKind::Redirect => "redirect",
            ResponseKind::ErrorPage => "error_page",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Empty,
    Text(String),
    Binary(Vec<u8>),
}

/// An HTTP-shaped response produced by the handout pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub kind: ResponseKind,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

impl Response {
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 302,
            kind: ResponseKind::Redirect,
            headers: vec![("Location".to_string(), location.to_string())],
            body: Body::Empty,
        }
    }

    pub fn html(page: String) -> Self {
        Self {
            status: 200,
            kind: ResponseKind::Html,
            headers: vec![("Content-Type".to_string(), HTML_CONTENT_TYPE.to_string())],
            body: Body::Text(page),
        }
    }

    pub fn error_page(page: String) -> Self {
        Self {
            status: 200,
            kind: ResponseKind::ErrorPage,
            headers: vec![("Content-Type".to_string(), HTML_CONTENT_TYPE.to_string())],
            body: Body::Text(page),
        }
    }

    pub fn pdf(filename: &str, bytes: Vec<u8>) -> Self {
        let headers = [
            ("Content-Type", "application/pdf".to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ),
            ("Content-Transfer-Encoding", "binary".to_string()),
            ("Content-Length", bytes.len().to_string()),
            (
                "Cache-Control",
                "no-store, no-cache, must-revalidate, max-age=0".to_string(),
            ),
            ("Pragma", "no-cache".to_string()),
            ("Expires", "0".to_string()),
        ];
        Self {
            status: 200,
            kind: ResponseKind::Pdf,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            body: Body::Binary(bytes),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Shown instead of a PDF when the renderer is missing or fails.
pub fn pdf_diagnostic_page(
    handout: &Handout,
    err: &HandoutError,
    renderer: &str,
    class_id: Option<i64>,
    date: NaiveDate,
) -> String {
    let back = match class_id {
        Some(id) => format!("?class_id={id}"),
        None => "?".to_string(),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>PDF Generation Unavailable</title>\n\
         <style>body{{font-family:Arial,Helvetica,sans-serif;max-width:720px;margin:40px auto;color:#222}}\
         .error-box{{border:1px solid #d9534f;background:#fdf0ef;padding:16px;border-radius:6px}}\
         code{{background:#eee;padding:1px 4px}}</style>\n</head>\n<body>\n\
         <div class=\"error-box\">\n<h1>PDF Generation Unavailable</h1>\n\
         <p>The {course} {week} handout could not be converted to PDF on {date}.</p>\n\
         <p><strong>Reason:</strong> {reason}</p>\n</div>\n\
         <h2>How to fix this</h2>\n<ol>\n\
         <li>Install the PDF renderer on the server, for example <code>apt install wkhtmltopdf</code>.</li>\n\
         <li>Make sure <code>{renderer} --version</code> runs for the service user.</li>\n\
         <li>If the renderer lives elsewhere, point <code>HANDOUTD_PDF_COMMAND</code> at it and restart the service.</li>\n\
         <li>Until then, open the handout in your browser and use its print function.</li>\n\
         </ol>\n<p><a href=\"{back}\">View the handout online</a></p>\n</body>\n</html>\n",
        course = escape(handout.course),
        week = escape(&handout.week_label()),
        date = date.format("%Y-%m-%d"),
        reason = escape(&err.to_string()),
        renderer = escape(renderer),
        back = back,
    )
}
