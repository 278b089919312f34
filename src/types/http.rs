//! Request and response shapes exchanged with the surrounding HTTP shell.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP method of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// True for methods that carry an `action` and change state.
    pub fn is_mutating(self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch | Method::Delete)
    }
}

/// One inbound exchange, already decoded by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    /// Request URI including the query string, used as the redirect target on failure.
    pub uri: String,
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub query: HashMap<String, String>,
    #[serde(default)]
    pub form: HashMap<String, String>,
}

impl Request {
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::Get,
            uri: uri.to_string(),
            session: String::new(),
            query: HashMap::new(),
            form: HashMap::new(),
        }
    }

    pub fn post(uri: &str) -> Self {
        Self { method: Method::Post, ..Self::get(uri) }
    }

    pub fn with_session(mut self, session: &str) -> Self {
        self.session = session.to_string();
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.form.insert(key.to_string(), value.to_string());
        self
    }

    /// Trimmed text form field; missing fields read as empty.
    pub fn text(&self, key: &str) -> &str {
        self.form.get(key).map(|v| v.trim()).unwrap_or("")
    }

    /// Integer form field; missing or unparsable fields read as 0.
    pub fn id(&self, key: &str) -> i64 {
        self.text(key).parse().unwrap_or(0)
    }
}

/// Where a successful or failed mutation sends the browser next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Show the given group.
    Group(i64),
    /// Landing page, no group selected.
    NoGroup,
    /// Back to the exact URI the request came from.
    Uri(String),
}

impl RouteTarget {
    pub fn location(&self) -> String {
        match self {
            RouteTarget::Group(id) => format!("?group={}", id),
            RouteTarget::NoGroup => "/".to_string(),
            RouteTarget::Uri(uri) => uri.clone(),
        }
    }
}

/// What the shell should send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// 303 See Other to `location`.
    Redirect { location: String },
    /// 200 with a full HTML page.
    Page { html: String },
}

impl Response {
    pub fn redirect(target: &RouteTarget) -> Self {
        Response::Redirect { location: target.location() }
    }

    pub fn status(&self) -> u16 {
        match self {
            Response::Redirect { .. } => 303,
            Response::Page { .. } => 200,
        }
    }
}
