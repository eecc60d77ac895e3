pub mod auth_handler;
pub mod root_handler;
pub mod snippet_handler;
pub mod user_handler;

use actix_web::{http::StatusCode, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    parsers,
    renderers::{self, Renderer, API_RENDERERS, HTML_RENDERERS},
};

/// What a route table needs to know about an endpoint besides its handlers.
#[derive(Debug)]
pub struct View {
    pub name: &'static str,
    pub description: &'static str,
    pub allow: &'static [&'static str],
    pub renderers: &'static [Renderer],
}

pub static API_ROOT: View = View {
    name: "Api Root",
    description: "Entry point listing the top-level collections.",
    allow: &["GET", "HEAD", "OPTIONS"],
    renderers: API_RENDERERS,
};

pub static SNIPPET_LIST: View = View {
    name: "Snippet List",
    description: "List all snippets, or create a new snippet.",
    allow: &["GET", "POST", "HEAD", "OPTIONS"],
    renderers: API_RENDERERS,
};

pub static SNIPPET_INSTANCE: View = View {
    name: "Snippet Instance",
    description: "Retrieve, update or delete a snippet.",
    allow: &["GET", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"],
    renderers: API_RENDERERS,
};

pub static SNIPPET_HIGHLIGHT: View = View {
    name: "Snippet Highlight",
    description: "The snippet's code rendered as a highlighted HTML page.",
    allow: &["GET", "HEAD", "OPTIONS"],
    renderers: HTML_RENDERERS,
};

pub static USER_LIST: View = View {
    name: "User List",
    description: "List all users.",
    allow: &["GET", "HEAD", "OPTIONS"],
    renderers: API_RENDERERS,
};

pub static USER_INSTANCE: View = View {
    name: "User Instance",
    description: "Retrieve a user and the snippets they own.",
    allow: &["GET", "HEAD", "OPTIONS"],
    renderers: API_RENDERERS,
};

pub static REGISTER: View = View {
    name: "Register",
    description: "Create an account.",
    allow: &["POST", "OPTIONS"],
    renderers: API_RENDERERS,
};

pub static LOGIN: View = View {
    name: "Login",
    description: "Exchange a username and password for a bearer token.",
    allow: &["POST", "OPTIONS"],
    renderers: API_RENDERERS,
};

/// Path parameters of collection endpoints.
#[derive(Debug, Deserialize)]
pub struct Suffix {
    pub format: Option<String>,
}

/// Path parameters of instance endpoints.
#[derive(Debug, Deserialize)]
pub struct Lookup {
    pub pk: String,
    pub format: Option<String>,
}

impl Lookup {
    pub fn id(&self) -> Result<i64, AppError> {
        self.pk.parse().map_err(|_| AppError::NotFound)
    }
}

#[derive(Serialize)]
struct Metadata {
    name: &'static str,
    description: &'static str,
    renders: Vec<&'static str>,
    parses: [&'static str; 2],
}

/// `OPTIONS`: describes the endpoint. The description is always JSON, but a
/// format suffix the view cannot render is still a 404.
pub fn describe(req: &HttpRequest, view: &View) -> Result<HttpResponse, AppError> {
    if let Some(format) = req.match_info().get("format") {
        renderers::negotiate(req, Some(format), view.renderers)?;
    }
    let metadata = Metadata {
        name: view.name,
        description: view.description,
        renders: view.renderers.iter().map(|r| r.media_type()).collect(),
        parses: parsers::MEDIA_TYPES,
    };
    renderers::render(req, Renderer::Json, view, StatusCode::OK, &metadata)
}

pub fn method_not_allowed(req: &HttpRequest, view: &View) -> AppError {
    AppError::MethodNotAllowed {
        method: req.method().to_string(),
        allow: view.allow,
    }
}

/// Fallback for paths no route matches.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}
