//! Link manager shell — HTTP exchanges as newline-delimited JSON over stdin/stdout.
//!
//! Request:  {"id":1, "session":"abc", "method":"POST", "uri":"/?group=2", "form":{"action":"add_group", ...}}
//! Response: {"id":1, "status":303, "location":"?group=3"}
//!           {"id":1, "status":200, "html":"<!DOCTYPE html>..."}
//!           {"id":1, "status":500, "html":"<generic failure page>"}

use std::io::{self, BufRead, Write};

use linkmanager::app::App;
use linkmanager::config::AppConfig;
use linkmanager::logging;
use linkmanager::request_router::handle_request;
use linkmanager::services::page_assembler::escape_html;
use linkmanager::types::http::{Request, Response};

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

/// One line of input: the request plus the caller's correlation id.
#[derive(Deserialize)]
struct ShellRequest {
    #[serde(default)]
    id: Value,
    #[serde(flatten)]
    request: Request,
}

fn failure_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Error</title></head><body><h1>Application Error</h1><p>{}</p></body></html>",
        escape_html(message)
    )
}

fn respond(value: Value) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.flush();
}

fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("linkmanager: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.log_level);

    info!(database = %config.database_path, "starting link manager shell");
    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to open database");
            std::process::exit(1);
        }
    };

    respond(json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let ShellRequest { id, request } = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                respond(json!({"id": null, "status": 400, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let response = match handle_request(&mut app, &request) {
            Ok(Response::Redirect { location }) => json!({"id": id, "status": 303, "location": location}),
            Ok(Response::Page { html }) => json!({"id": id, "status": 200, "html": html}),
            Err(e) => {
                error!(error = %e, uri = %request.uri, "request aborted");
                json!({"id": id, "status": 500, "html": failure_page(&e.to_string())})
            }
        };
        respond(response);
    }
}
