//! Handout document assembly.
//!
//! Everything here is a pure function of [`RenderContext`]. The HTML page and
//! the PDF share [`render_content`]; they differ only in the wrapping.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::handout::Handout;
use crate::session::Role;

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub handout: &'static Handout,
    pub role: Role,
    pub student_name: String,
    pub student_email: String,
    pub instructor_name: String,
    pub instructor_email: String,
    pub date: NaiveDate,
    pub class_id: Option<i64>,
    pub dashboard_url: String,
}

impl RenderContext {
    fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    fn badge(&self) -> &'static str {
        match self.role {
            Role::Student => "Student Copy",
            Role::Instructor => "Instructor Copy",
        }
    }

    fn holder_label(&self) -> &'static str {
        match self.role {
            Role::Student => "Student",
            Role::Instructor => "Facilitator",
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The handout body shared by the page and the PDF.
pub fn render_content(ctx: &RenderContext) -> String {
    let h = ctx.handout;
    let mut out = String::new();

    let _ = write!(
        out,
        "<div class=\"handout-header\">\
         <span class=\"badge badge-{role}\">{badge}</span>\
         <p class=\"course-label\">{course} &middot; {week}</p>\
         <h1>{title}</h1>\
         <p class=\"subtitle\">{subtitle}</p>\
         </div>",
        role = ctx.role.as_str(),
        badge = ctx.badge(),
        course = escape(h.course),
        week = escape(&h.week_label()),
        title = escape(h.title),
        subtitle = escape(h.subtitle),
    );

    let _ = write!(
        out,
        "<table class=\"handout-meta\">\
         <tr><th>{holder}</th><td>{name}</td><th>Email</th><td>{email}</td></tr>\
         <tr><th>Instructor</th><td>{iname}</td><th>Instructor Email</th><td>{iemail}</td></tr>\
         <tr><th>Date</th><td colspan=\"3\">{date}</td></tr>\
         </table>",
        holder = ctx.holder_label(),
        name = escape(&ctx.student_name),
        email = escape(&ctx.student_email),
        iname = escape(&ctx.instructor_name),
        iemail = escape(&ctx.instructor_email),
        date = ctx.display_date(),
    );

    out.push_str("<section class=\"objectives\"><h2>Learning Objectives</h2><ol>");
    for objective in h.objectives {
        let _ = write!(out, "<li>{}</li>", escape(objective));
    }
    out.push_str("</ol></section>");

    for section in h.sections {
        let _ = write!(out, "<section><h2>{}</h2>", escape(section.heading));
        for p in section.paragraphs {
            let _ = write!(out, "<p>{}</p>", escape(p));
        }
        if !section.points.is_empty() {
            out.push_str("<ul>");
            for point in section.points {
                let _ = write!(out, "<li>{}</li>", escape(point));
            }
            out.push_str("</ul>");
        }
        out.push_str("</section>");
    }

    out.push_str("<section class=\"key-terms\"><h2>Key Terms</h2><dl>");
    for (term, meaning) in h.key_terms {
        let _ = write!(out, "<dt>{}</dt><dd>{}</dd>", escape(term), escape(meaning));
    }
    out.push_str("</dl></section>");

    out.push_str("<section class=\"activities\"><h2>Activities</h2>");
    for (i, activity) in h.activities.iter().enumerate() {
        let _ = write!(
            out,
            "<div class=\"activity\"><h3>Activity {}: {} <small>({} minutes)</small></h3><ol>",
            i + 1,
            escape(activity.title),
            activity.minutes
        );
        for step in activity.steps {
            let _ = write!(out, "<li>{}</li>", escape(step));
        }
        out.push_str("</ol></div>");
    }
    out.push_str("</section>");

    out.push_str("<section class=\"reflection\"><h2>Reflection</h2>");
    for prompt in h.reflection {
        let _ = write!(
            out,
            "<div class=\"prompt\"><p>{}</p><div class=\"answer-lines\"></div></div>",
            escape(prompt)
        );
    }
    out.push_str("</section>");

    out
}

fn back_link(ctx: &RenderContext) -> String {
    match ctx.class_id {
        Some(id) => format!(
            "<a class=\"back-link\" href=\"class.php?id={id}\">&larr; Back to Class</a>"
        ),
        None => format!(
            "<a class=\"back-link\" href=\"{}\">&larr; Back to Dashboard</a>",
            escape(&ctx.dashboard_url)
        ),
    }
}

fn download_link(ctx: &RenderContext) -> String {
    let href = match ctx.class_id {
        Some(id) => format!("?class_id={id}&amp;download=pdf"),
        None => "?download=pdf".to_string(),
    };
    format!("<a class=\"download-link\" href=\"{href}\">Download PDF</a>")
}

const PAGE_STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;margin:0;background:#f4f6f8;color:#222}\
.page-nav{display:flex;justify-content:space-between;padding:12px 24px;background:#2c5f8a}\
.page-nav a{color:#fff;text-decoration:none;font-weight:bold}\
main{max-width:880px;margin:24px auto;background:#fff;padding:32px;border-radius:6px}\
.badge{display:inline-block;padding:2px 10px;border-radius:10px;font-size:12px;color:#fff}\
.badge-student{background:#3a8d5c}.badge-instructor{background:#8a4b2c}\
.handout-meta{width:100%;border-collapse:collapse;margin:16px 0}\
.handout-meta th,.handout-meta td{border:1px solid #ddd;padding:6px;text-align:left}\
.answer-lines{border-bottom:1px solid #bbb;height:48px}\
footer{text-align:center;font-size:12px;color:#777;padding:16px}";

const PRINT_STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;font-size:11pt;color:#000}\
h1{font-size:18pt}h2{font-size:14pt;border-bottom:1px solid #999}\
.badge{border:1px solid #000;padding:1px 6px;font-size:9pt}\
.handout-meta{width:100%;border-collapse:collapse}\
.handout-meta th,.handout-meta td{border:1px solid #999;padding:4px;text-align:left}\
.answer-lines{border-bottom:1px solid #999;height:40px}";

/// Full on-screen page: chrome around the shared content.
pub fn render_page(ctx: &RenderContext) -> String {
    let h = ctx.handout;
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{course} {week} Handout: {title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <nav class=\"page-nav\">{back}{download}</nav>\n\
         <main>{content}</main>\n\
         <footer>{course} &middot; {week} Handout &middot; {date}</footer>\n\
         </body>\n</html>\n",
        course = escape(h.course),
        week = escape(&h.week_label()),
        title = escape(h.title),
        style = PAGE_STYLE,
        back = back_link(ctx),
        download = download_link(ctx),
        content = render_content(ctx),
        date = ctx.display_date(),
    )
}

/// Print-friendly document handed to the PDF renderer.
pub fn render_pdf_fragment(ctx: &RenderContext) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <style>{style}</style>\n</head>\n<body>\n{content}\n</body>\n</html>\n",
        style = PRINT_STYLE,
        content = render_content(ctx),
    )
}

pub fn render_pdf_header(ctx: &RenderContext) -> String {
    let h = ctx.handout;
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head>\
         <body style=\"font-family:Helvetica,Arial,sans-serif;font-size:9pt;border-bottom:1px solid #999\">\
         {course} &middot; {week} Handout &middot; {badge}</body></html>",
        course = escape(h.course),
        week = escape(&h.week_label()),
        badge = ctx.badge(),
    )
}

pub fn render_pdf_footer(ctx: &RenderContext) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head>\
         <body style=\"font-family:Helvetica,Arial,sans-serif;font-size:8pt;border-top:1px solid #999\">\
         {name} &middot; Generated {date}</body></html>",
        name = escape(&ctx.student_name),
        date = ctx.date.format("%Y-%m-%d"),
    )
}
