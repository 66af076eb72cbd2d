//! PDF output through an external HTML-to-PDF renderer.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;
use uuid::Uuid;

use crate::error::PdfError;
use crate::render::escape;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
}

/// A document staged for conversion.
#[derive(Debug, Clone, Default)]
pub struct PdfDocument {
    pub metadata: PdfMetadata,
    pub header_html: Option<String>,
    pub footer_html: Option<String>,
    pub body_html: String,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_metadata(&mut self, metadata: PdfMetadata) {
        self.metadata = metadata;
    }

    pub fn set_header_html(&mut self, html: String) {
        self.header_html = Some(html);
    }

    pub fn set_footer_html(&mut self, html: String) {
        self.footer_html = Some(html);
    }

    pub fn write_html(&mut self, html: &str) {
        self.body_html.push_str(html);
    }

    pub fn output(&self, engine: &dyn PdfEngine) -> Result<Vec<u8>, PdfError> {
        engine.render(self)
    }
}

pub trait PdfEngine {
    /// Fails with [`PdfError::Unavailable`] when the renderer cannot be used.
    fn check_available(&self) -> Result<(), PdfError>;

    fn render(&self, doc: &PdfDocument) -> Result<Vec<u8>, PdfError>;
}

/// Drives a wkhtmltopdf-compatible command: HTML on stdin, PDF on stdout.
#[derive(Debug, Clone)]
pub struct CommandPdfEngine {
    command: String,
}

impl CommandPdfEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn unavailable(&self) -> PdfError {
        PdfError::Unavailable {
            command: self.command.clone(),
        }
    }
}

impl PdfEngine for CommandPdfEngine {
    fn check_available(&self) -> Result<(), PdfError> {
        let status = Command::new(&self.command)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(s) if s.success() => Ok(()),
            Ok(s) => {
                debug!(command = %self.command, %s, "renderer probe failed");
                Err(self.unavailable())
            }
            Err(e) => {
                debug!(command = %self.command, error = %e, "renderer probe failed");
                Err(self.unavailable())
            }
        }
    }

    fn render(&self, doc: &PdfDocument) -> Result<Vec<u8>, PdfError> {
        let bands = TempBands::write(doc)?;

        let mut cmd = Command::new(&self.command);
        cmd.arg("--quiet").arg("--encoding").arg("UTF-8");
        if !doc.metadata.title.is_empty() {
            cmd.arg("--title").arg(&doc.metadata.title);
        }
        if let Some(p) = &bands.header {
            cmd.arg("--header-html").arg(p);
        }
        if let Some(p) = &bands.footer {
            cmd.arg("--footer-html").arg(p);
        }
        cmd.arg("-").arg("-");

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from a separate thread so a full stdout pipe cannot stall us.
        let body = with_document_meta(&doc.body_html, &doc.metadata).into_bytes();
        let stdin = child.stdin.take();
        let feeder = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&body)?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        let fed = feeder.join();

        // A renderer that exits early closes stdin; its own status and stderr name the cause.
        if !output.status.success() {
            return Err(PdfError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        match fed {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(PdfError::Input(e)),
            Err(_) => {
                return Err(PdfError::Failed {
                    status: "feeder panic".to_string(),
                    stderr: String::new(),
                })
            }
        }
        if !output.stdout.starts_with(b"%PDF-") {
            return Err(PdfError::InvalidOutput);
        }
        Ok(output.stdout)
    }
}

// wkhtmltopdf only takes a title flag; author and subject ride along as meta tags.
fn with_document_meta(html: &str, meta: &PdfMetadata) -> String {
    let tags = format!(
        "<meta name=\"author\" content=\"{}\"><meta name=\"subject\" content=\"{}\">",
        escape(&meta.author),
        escape(&meta.subject)
    );
    match html.find("<head>") {
        Some(at) => {
            let split = at + "<head>".len();
            format!("{}{}{}", &html[..split], tags, &html[split..])
        }
        None => html.to_string(),
    }
}

/// Header/footer templates live in temp files for the renderer's duration.
struct TempBands {
    header: Option<PathBuf>,
    footer: Option<PathBuf>,
}

impl TempBands {
    fn write(doc: &PdfDocument) -> Result<Self, PdfError> {
        let stem = Uuid::new_v4();
        // Dropping a partially written set still removes what was written.
        let mut bands = Self {
            header: None,
            footer: None,
        };
        let header_name = format!("handoutd-{stem}-header.html");
        let footer_name = format!("handoutd-{stem}-footer.html");
        bands.header = write_band(doc.header_html.as_deref(), &header_name)?;
        bands.footer = write_band(doc.footer_html.as_deref(), &footer_name)?;
        Ok(bands)
    }
}

impl Drop for TempBands {
    fn drop(&mut self) {
        for p in [&self.header, &self.footer].into_iter().flatten() {
            let _ = std::fs::remove_file(p);
        }
    }
}

fn write_band(html: Option<&str>, name: &str) -> Result<Option<PathBuf>, PdfError> {
    let Some(html) = html else {
        return Ok(None);
    };
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, html).map_err(|source| PdfError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_tags_are_inserted_after_head() {
        let meta = PdfMetadata {
            title: "T".into(),
            author: "A & B".into(),
            subject: "S".into(),
        };
        let out = with_document_meta("<html><head><title>x</title></head></html>", &meta);
        assert!(out.starts_with("<html><head><meta name=\"author\" content=\"A &amp; B\">"));
        assert!(out.ends_with("<title>x</title></head></html>"));
    }

    #[test]
    fn missing_command_is_unavailable() {
        let engine = CommandPdfEngine::new("handoutd-no-such-renderer-binary");
        assert!(matches!(
            engine.check_available(),
            Err(PdfError::Unavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_reports_renderer_status_and_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("handoutd-pdf-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let script = dir.join("renderer.sh");
        std::fs::write(&script, "#!/bin/sh\necho 'bad flag --foo' >&2\nexit 3\n")
            .expect("write script");
        let mut perms = std::fs::metadata(&script).expect("stat").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).expect("chmod");

        // Large enough that the feeder outlives the renderer and hits a closed pipe.
        let mut doc = PdfDocument::new();
        doc.write_html("<html><head></head><body>");
        doc.write_html(&"<p>filler paragraph</p>".repeat(80_000));
        doc.write_html("</body></html>");

        let engine = CommandPdfEngine::new(script.to_string_lossy());
        match engine.render(&doc) {
            Err(PdfError::Failed { status, stderr }) => {
                assert!(status.contains('3'), "{status}");
                assert_eq!(stderr, "bad flag --foo");
            }
            other => panic!("expected renderer failure, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(dir);
    }
}
