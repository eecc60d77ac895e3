use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::{
    error::AppError,
    handlers::{Suffix, API_ROOT},
    renderers::{negotiate, render},
    utils::links::Links,
};

#[derive(Serialize)]
struct ApiRoot {
    users: String,
    snippets: String,
}

pub async fn api_root(req: HttpRequest, path: web::Path<Suffix>) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), API_ROOT.renderers)?;

    let links = Links::new(&req, path.format.as_deref());
    let root = ApiRoot {
        users: links.user_list(),
        snippets: links.snippet_list(),
    };
    render(&req, renderer, &API_ROOT, StatusCode::OK, &root)
}
