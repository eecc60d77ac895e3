//! Response renderers and `Accept`-header negotiation.

use actix_web::{
    http::{header, StatusCode},
    HttpMessage, HttpRequest, HttpResponse,
};
use mime::Mime;
use serde::Serialize;

use crate::{error::AppError, handlers::View, highlight::escape_html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    Json,
    /// Human-readable HTML page wrapping the JSON payload.
    BrowsableApi,
    /// Pre-rendered HTML passed through untouched.
    StaticHtml,
}

pub const API_RENDERERS: &[Renderer] = &[Renderer::Json, Renderer::BrowsableApi];
pub const HTML_RENDERERS: &[Renderer] = &[Renderer::StaticHtml];

impl Renderer {
    /// Name used by format suffixes and `?format=`.
    pub fn format(self) -> &'static str {
        match self {
            Renderer::Json => "json",
            Renderer::BrowsableApi => "api",
            Renderer::StaticHtml => "html",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Renderer::Json => "application/json",
            Renderer::BrowsableApi | Renderer::StaticHtml => "text/html",
        }
    }

    fn matches(self, accepted: &Mime) -> bool {
        let (ty, subty) = self
            .media_type()
            .split_once('/')
            .unwrap_or((self.media_type(), ""));
        let type_matches = accepted.type_() == mime::STAR || accepted.type_().as_str() == ty;
        let subtype_matches =
            accepted.subtype() == mime::STAR || accepted.subtype().as_str() == subty;
        type_matches && subtype_matches
    }
}

/// Picks the renderer for a request.
///
/// An explicit format (URL suffix, else `?format=`) must name one of
/// `available` or the resource is not found. Otherwise the `Accept` header
/// is matched in preference order, and a request without one gets the first
/// renderer.
pub fn negotiate(
    req: &HttpRequest,
    suffix: Option<&str>,
    available: &[Renderer],
) -> Result<Renderer, AppError> {
    let fallback = available.first().copied().ok_or(AppError::NotAcceptable)?;

    if let Some(format) = suffix.map(str::to_owned).or_else(|| query_format(req)) {
        return available
            .iter()
            .copied()
            .find(|renderer| renderer.format() == format)
            .ok_or(AppError::NotFound);
    }

    let ranked = match req.get_header::<header::Accept>() {
        Some(accept) => accept.ranked(),
        None => return Ok(fallback),
    };
    if ranked.is_empty() {
        return Ok(fallback);
    }

    ranked
        .iter()
        .find_map(|accepted| available.iter().copied().find(|r| r.matches(accepted)))
        .ok_or(AppError::NotAcceptable)
}

fn query_format(req: &HttpRequest) -> Option<String> {
    let params: Vec<(String, String)> = serde_urlencoded::from_str(req.query_string()).ok()?;
    params
        .into_iter()
        .find(|(key, _)| key == "format")
        .map(|(_, value)| value)
}

/// Serializes `body` with `renderer` into a response for `view`.
pub fn render<T: Serialize>(
    req: &HttpRequest,
    renderer: Renderer,
    view: &View,
    status: StatusCode,
    body: &T,
) -> Result<HttpResponse, AppError> {
    let allow = view.allow.join(", ");
    let mut builder = HttpResponse::build(status);
    builder
        .insert_header((header::ALLOW, allow.clone()))
        .insert_header((header::VARY, "Accept"));

    match renderer {
        Renderer::Json => {
            let json = serde_json::to_vec(body)?;
            Ok(builder.content_type(mime::APPLICATION_JSON).body(json))
        }
        Renderer::BrowsableApi => {
            let json = serde_json::to_string_pretty(body)?;
            let page = browsable_page(req, view, status, &allow, &json);
            Ok(builder.content_type(mime::TEXT_HTML_UTF_8).body(page))
        }
        Renderer::StaticHtml => {
            let html = match serde_json::to_value(body)? {
                serde_json::Value::String(html) => html,
                other => other.to_string(),
            };
            Ok(builder.content_type(mime::TEXT_HTML_UTF_8).body(html))
        }
    }
}

fn browsable_page(
    req: &HttpRequest,
    view: &View,
    status: StatusCode,
    allow: &str,
    json: &str,
) -> String {
    let reason = status.canonical_reason().unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{name}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{name}</h1>\n\
         <p>{description}</p>\n\
         <pre class=\"request-info\"><b>{method}</b> {path}</pre>\n\
         <pre class=\"response-info\"><b>HTTP {code} {reason}</b>\n\
         <b>Allow:</b> {allow}\n\
         <b>Content-Type:</b> application/json\n\
         <b>Vary:</b> Accept\n\
         \n\
         {json}</pre>\n\
         </body>\n\
         </html>\n",
        name = escape_html(view.name),
        description = escape_html(view.description),
        method = req.method(),
        path = escape_html(&req.uri().to_string()),
        code = status.as_u16(),
        json = escape_html(json),
    )
}
