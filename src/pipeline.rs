//! The per-request handout flow:
//! session gate, access check, data load, render, then emit.
//!
//! Each stage returns a value and only [`Pipeline::handle`] turns it into a response.
//! A failed gate or access check ends the request before any data is loaded.

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{error, info, warn};

use crate::access;
use crate::config::Config;
use crate::emit::{self, Response};
use crate::error::{HandoutError, PdfError};
use crate::handout::Handout;
use crate::loader;
use crate::params::{self, Download};
use crate::pdf::{PdfDocument, PdfEngine, PdfMetadata};
use crate::render::{self, RenderContext};
use crate::session::{self, Principal, Role, Session};

/// Terminal state a request ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Emitted,
    RedirectedToLogin,
    RedirectedToDashboard,
    ErrorShown,
}

impl Terminal {
    pub fn as_str(self) -> &'static str {
        match self {
            Terminal::Emitted => "emitted",
            Terminal::RedirectedToLogin => "redirected_to_login",
            Terminal::RedirectedToDashboard => "redirected_to_dashboard",
            Terminal::ErrorShown => "error_shown",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HandoutRequest<'a> {
    pub handout: &'static Handout,
    pub session: &'a Session,
    pub class_id: Option<&'a str>,
    pub download: Option<&'a str>,
}

#[derive(Debug)]
pub enum Outcome {
    RedirectToLogin,
    RedirectToDashboard(Role),
    Page(String),
    Pdf { filename: String, bytes: Vec<u8> },
    PdfFailed(HandoutError),
}

pub struct Pipeline<'a> {
    pub conn: Option<&'a Connection>,
    pub config: &'a Config,
    pub pdf: &'a dyn PdfEngine,
    pub renderer_name: &'a str,
}

impl Pipeline<'_> {
    pub fn handle(&self, req: &HandoutRequest<'_>, today: NaiveDate) -> (Terminal, Response) {
        let class_id = params::parse_class_id(req.class_id);
        let outcome = self.run(req, class_id, today);
        match outcome {
            Outcome::RedirectToLogin => (
                Terminal::RedirectedToLogin,
                Response::redirect(&self.config.login_url),
            ),
            Outcome::RedirectToDashboard(role) => (
                Terminal::RedirectedToDashboard,
                Response::redirect(self.config.dashboard_url(role)),
            ),
            Outcome::Page(page) => (Terminal::Emitted, Response::html(page)),
            Outcome::Pdf { filename, bytes } => {
                (Terminal::Emitted, Response::pdf(&filename, bytes))
            }
            Outcome::PdfFailed(e) => {
                let page = emit::pdf_diagnostic_page(
                    req.handout,
                    &e,
                    self.renderer_name,
                    class_id,
                    today,
                );
                (Terminal::ErrorShown, Response::error_page(page))
            }
        }
    }

    fn run(&self, req: &HandoutRequest<'_>, class_id: Option<i64>, today: NaiveDate) -> Outcome {
        let Some(principal) = session::authenticate(req.session) else {
            let e = HandoutError::AuthenticationMissing;
            info!(handout = req.handout.id, code = e.code(), "{e}");
            return Outcome::RedirectToLogin;
        };

        if let Err(e) = access::check_access(self.conn, principal) {
            info!(handout = req.handout.id, code = e.code(), "{e}");
            return Outcome::RedirectToDashboard(principal.role);
        }

        let ctx = prepare_context(self.conn, self.config, req, principal, class_id, today);

        match params::parse_download(req.download) {
            Download::Html => Outcome::Page(render::render_page(&ctx)),
            Download::Pdf => match build_pdf(&ctx, self.pdf) {
                Ok(bytes) => Outcome::Pdf {
                    filename: ctx.handout.pdf_filename(today),
                    bytes,
                },
                Err(e) => {
                    match &e {
                        HandoutError::Pdf(PdfError::Unavailable { .. }) => {
                            warn!(handout = req.handout.id, code = e.code(), "{e}")
                        }
                        _ => error!(
                            handout = req.handout.id,
                            code = e.code(),
                            error = %e,
                            "PDF generation failed"
                        ),
                    }
                    Outcome::PdfFailed(e)
                }
            },
        }
    }
}

/// Session and database data gathered into a [`RenderContext`]. Only called
/// once the principal has passed the gate and the access check.
pub fn prepare_context(
    conn: Option<&Connection>,
    config: &Config,
    req: &HandoutRequest<'_>,
    principal: Principal,
    class_id: Option<i64>,
    today: NaiveDate,
) -> RenderContext {
    let user = loader::load_user(conn, principal.user_id, req.session);
    let instructor = loader::load_instructor(conn, class_id, req.session);
    RenderContext {
        handout: req.handout,
        role: principal.role,
        student_name: user.full_name(),
        student_email: user.email,
        instructor_name: instructor.name,
        instructor_email: instructor.email,
        date: today,
        class_id,
        dashboard_url: config.dashboard_url(principal.role).to_string(),
    }
}

fn build_pdf(ctx: &RenderContext, engine: &dyn PdfEngine) -> Result<Vec<u8>, HandoutError> {
    engine.check_available()?;

    let h = ctx.handout;
    let mut doc = PdfDocument::new();
    doc.set_metadata(PdfMetadata {
        title: format!("{} {} Handout: {}", h.course, h.week_label(), h.title),
        author: ctx.instructor_name.clone(),
        subject: format!("{} {}", h.course, h.week_label()),
    });
    doc.set_header_html(render::render_pdf_header(ctx));
    doc.set_footer_html(render::render_pdf_footer(ctx));
    doc.write_html(&render::render_pdf_fragment(ctx));
    Ok(doc.output(engine)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{Body, ResponseKind};
    use crate::handout;
    use std::cell::Cell;

    struct StubEngine {
        available: bool,
        fail: bool,
        renders: Cell<usize>,
    }

    impl StubEngine {
        fn new(available: bool, fail: bool) -> Self {
            Self {
                available,
                fail,
                renders: Cell::new(0),
            }
        }
    }

    impl PdfEngine for StubEngine {
        fn check_available(&self) -> Result<(), PdfError> {
            if self.available {
                Ok(())
            } else {
                Err(PdfError::Unavailable {
                    command: "stub".into(),
                })
            }
        }

        fn render(&self, doc: &PdfDocument) -> Result<Vec<u8>, PdfError> {
            self.renders.set(self.renders.get() + 1);
            if self.fail {
                return Err(PdfError::InvalidOutput);
            }
            assert!(doc.header_html.is_some());
            assert!(doc.footer_html.is_some());
            Ok(format!("%PDF-1.4 {}", doc.metadata.title).into_bytes())
        }
    }

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().expect("memory db");
        conn.execute_batch(
            "CREATE TABLE users(id INTEGER PRIMARY KEY, email TEXT, first_name TEXT, last_name TEXT);
             CREATE TABLE courses(id INTEGER PRIMARY KEY, title TEXT);
             CREATE TABLE class_batches(id INTEGER PRIMARY KEY, course_id INTEGER, instructor_id INTEGER);
             CREATE TABLE enrollments(id INTEGER PRIMARY KEY, student_id INTEGER, batch_id INTEGER, status TEXT);
             INSERT INTO users VALUES (1, 'ana@example.edu', 'Ana', 'Lopez');
             INSERT INTO users VALUES (2, 'ben@example.edu', 'Ben', 'Okafor');
             INSERT INTO courses VALUES (10, 'Life Skills 101');
             INSERT INTO class_batches VALUES (5, 10, 2);
             INSERT INTO enrollments VALUES (1, 1, 5, 'active');",
        )
        .expect("seed");
        conn
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).expect("date")
    }

    fn student_session() -> Session {
        Session {
            user_id: Some(1),
            user_role: Some("student".into()),
            ..Session::default()
        }
    }

    fn run(
        conn: Option<&Connection>,
        engine: &StubEngine,
        session: &Session,
        class_id: Option<&str>,
        download: Option<&str>,
    ) -> (Terminal, Response) {
        let config = Config::default();
        let pipeline = Pipeline {
            conn,
            config: &config,
            pdf: engine,
            renderer_name: "stub",
        };
        let req = HandoutRequest {
            handout: handout::find("life-skills-week-1").expect("week 1"),
            session,
            class_id,
            download,
        };
        pipeline.handle(&req, today())
    }

    #[test]
    fn unauthenticated_session_redirects_to_login() {
        let conn = seeded();
        let engine = StubEngine::new(true, false);
        let (state, resp) = run(Some(&conn), &engine, &Session::default(), None, None);
        assert_eq!(state, Terminal::RedirectedToLogin);
        assert_eq!(resp.header("Location"), Some("login.php"));
        assert_eq!(resp.body, Body::Empty);
    }

    #[test]
    fn missing_database_fails_closed() {
        let engine = StubEngine::new(true, false);
        let (state, resp) = run(None, &engine, &student_session(), None, None);
        assert_eq!(state, Terminal::RedirectedToDashboard);
        assert_eq!(resp.header("Location"), Some("student_dashboard.php"));
    }

    #[test]
    fn html_page_uses_database_names_and_class_instructor() {
        let conn = seeded();
        let engine = StubEngine::new(true, false);
        let (state, resp) = run(Some(&conn), &engine, &student_session(), Some("5"), None);
        assert_eq!(state, Terminal::Emitted);
        let Body::Text(page) = resp.body else {
            panic!("expected html body");
        };
        assert!(page.contains("Ana Lopez"));
        assert!(page.contains("Ben Okafor"));
        assert!(page.contains("class.php?id=5"));
        assert_eq!(engine.renders.get(), 0);
    }

    #[test]
    fn unavailable_renderer_shows_diagnostic_without_rendering() {
        let conn = seeded();
        let engine = StubEngine::new(false, false);
        let (state, resp) = run(Some(&conn), &engine, &student_session(), None, Some("pdf"));
        assert_eq!(state, Terminal::ErrorShown);
        assert_eq!(resp.kind, ResponseKind::ErrorPage);
        assert_eq!(engine.renders.get(), 0);
    }

    #[test]
    fn renderer_failure_becomes_diagnostic_page() {
        let conn = seeded();
        let engine = StubEngine::new(true, true);
        let (state, resp) = run(Some(&conn), &engine, &student_session(), None, Some("pdf"));
        assert_eq!(state, Terminal::ErrorShown);
        let Body::Text(page) = resp.body else {
            panic!("expected diagnostic body");
        };
        assert!(page.contains("How to fix this"));
    }

    #[test]
    fn pdf_download_sets_attachment_headers() {
        let conn = seeded();
        let engine = StubEngine::new(true, false);
        let (state, resp) = run(Some(&conn), &engine, &student_session(), None, Some("pdf"));
        assert_eq!(state, Terminal::Emitted);
        assert_eq!(resp.header("Content-Type"), Some("application/pdf"));
        assert_eq!(
            resp.header("Content-Disposition"),
            Some("attachment; filename=\"Life_Skills_Week1_Handout_2026-10-18.pdf\"")
        );
        assert!(matches!(resp.body, Body::Binary(ref b) if b.starts_with(b"%PDF-")));
    }
}
