use crate::emit::{self, Body, Response};
use crate::error::{HandoutError, PdfError};
use crate::handout::{self, Handout};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::params::{parse_class_id, query_value};
use crate::pipeline::{HandoutRequest, Pipeline, Terminal};
use crate::session::Session;
use chrono::NaiveDate;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{error, info};

fn handle_handouts_list(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "handouts": handout::catalog() }))
}

fn handle_handouts_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(handout_id) = req.params.get("handoutId").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing handoutId", None);
    };
    let Some(handout) = handout::find(handout_id) else {
        return err(
            &req.id,
            "not_found",
            "handout not found",
            Some(json!({ "handoutId": handout_id })),
        );
    };

    let session = Session::from_json(req.params.get("session"));
    let query = req.params.get("query");
    let class_id = query_value(query, "class_id");
    let download = query_value(query, "download");
    let today = chrono::Local::now().date_naive();

    let pipeline = Pipeline {
        conn: state.db.as_ref(),
        config: &state.config,
        pdf: &state.pdf,
        renderer_name: state.pdf.command(),
    };
    let (terminal, response) = pipeline.handle(
        &HandoutRequest {
            handout,
            session: &session,
            class_id: class_id.as_deref(),
            download: download.as_deref(),
        },
        today,
    );
    info!(
        handout = handout.id,
        state = terminal.as_str(),
        status = response.status,
        content_type = response.header("Content-Type").unwrap_or(""),
        "handout request finished"
    );

    if let Body::Binary(bytes) = &response.body {
        let out = pdf_sink(state, req, handout, today);
        if let Err(e) = write_binary(&out, bytes) {
            let e = HandoutError::Pdf(e);
            error!(
                path = %out.display(),
                code = e.code(),
                error = %e,
                "failed to write PDF body"
            );
            let page = emit::pdf_diagnostic_page(
                handout,
                &e,
                state.pdf.command(),
                parse_class_id(class_id.as_deref()),
                today,
            );
            let shown = Response::error_page(page);
            return ok(&req.id, response_json(Terminal::ErrorShown, &shown));
        }
        let mut result = response_json(terminal, &response);
        result["bodyPath"] = json!(out.to_string_lossy());
        result["byteLength"] = json!(bytes.len());
        result["sha256"] = json!(format!("{:x}", Sha256::digest(bytes)));
        return ok(&req.id, result);
    }

    ok(&req.id, response_json(terminal, &response))
}

fn response_json(terminal: Terminal, response: &Response) -> serde_json::Value {
    let mut result = json!({
        "status": response.status,
        "kind": response.kind.as_str(),
        "state": terminal.as_str(),
        "headers": headers_json(response),
    });
    if let Body::Text(text) = &response.body {
        result["body"] = json!(text);
    }
    result
}

fn headers_json(response: &Response) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (k, v) in &response.headers {
        map.insert(k.clone(), json!(v));
    }
    serde_json::Value::Object(map)
}

/// `params.outPath`, else `<workspace>/downloads/<filename>`, else the temp dir.
fn pdf_sink(state: &AppState, req: &Request, handout: &Handout, today: NaiveDate) -> PathBuf {
    if let Some(p) = req.params.get("outPath").and_then(|v| v.as_str()) {
        return PathBuf::from(p);
    }
    let filename = handout.pdf_filename(today);
    match &state.workspace {
        Some(ws) => ws.join("downloads").join(filename),
        None => std::env::temp_dir().join(filename),
    }
}

fn write_binary(path: &Path, bytes: &[u8]) -> Result<(), PdfError> {
    let failed = |source| PdfError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(failed)?;
    }
    std::fs::write(path, bytes).map_err(failed)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "handouts.list" => Some(handle_handouts_list(state, req)),
        "handouts.get" => Some(handle_handouts_get(state, req)),
        _ => None,
    }
}
