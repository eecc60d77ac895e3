use actix_web::{
    http::{
        header::{self, HeaderValue},
        Method, StatusCode,
    },
    web, HttpRequest, HttpResponse,
};
use crate::{
    db,
    error::AppError,
    handlers::{Lookup, Suffix, SNIPPET_HIGHLIGHT, SNIPPET_INSTANCE, SNIPPET_LIST},
    models::{Snippet, UserData},
    parsers, permissions,
    renderers::{negotiate, render},
    serializers::snippet::{self, Mode, SnippetRepresentation},
    utils::{
        links::Links,
        pagination::{requested_page, Page, Paginated},
    },
    AppState,
};

// _______________________________________ Collection _______________________________________
pub async fn list(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Suffix>,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), SNIPPET_LIST.renderers)?;

    let count = db::snippets::count(&app_data.db).await?;
    let requested = requested_page(&req)?;
    let page = Page::resolve(requested.as_deref(), count, app_data.settings.page_size)?;
    let snippets = db::snippets::list(&app_data.db, page.limit(), page.offset()).await?;

    let links = Links::new(&req, path.format.as_deref());
    let results: Vec<_> = snippets
        .iter()
        .map(|snippet| SnippetRepresentation::new(snippet, &links))
        .collect();

    render(
        &req,
        renderer,
        &SNIPPET_LIST,
        StatusCode::OK,
        &Paginated::new(&req, page, count, results),
    )
}

/// Creates a snippet owned by the requester.
pub async fn create(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Suffix>,
    user_data: Option<web::ReqData<UserData>>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), SNIPPET_LIST.renderers)?;
    permissions::authenticated_or_read_only(req.method(), user_data.as_deref())?;
    let user = user_data.ok_or(AppError::NotAuthenticated)?;

    let data = parsers::parse(&req, &body)?;
    let links = Links::new(&req, path.format.as_deref());

    // the token may outlive the account it was issued for
    let owner = db::users::fetch(&app_data.db, user.id)
        .await?
        .ok_or_else(|| AppError::AuthenticationFailed("User not found.".into()))?;

    let draft = snippet::validate(&data, Mode::Create)?.into_new();
    let created =
        db::snippets::insert(&app_data.db, &app_data.highlighter, owner.id, &draft).await?;
    log::info!("{} created snippet {}", owner.username, created.id);

    let body = SnippetRepresentation::new(&created, &links);
    let mut response = render(&req, renderer, &SNIPPET_LIST, StatusCode::CREATED, &body)?;
    if let Ok(location) = HeaderValue::from_str(&body.url) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    Ok(response)
}

// _______________________________________ Instance _______________________________________
async fn lookup(app_data: &AppState, path: &Lookup) -> Result<Snippet, AppError> {
    db::snippets::fetch(&app_data.db, path.id()?)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn retrieve(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Lookup>,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), SNIPPET_INSTANCE.renderers)?;
    let snippet = lookup(&app_data, &path).await?;

    let links = Links::new(&req, path.format.as_deref());
    render(
        &req,
        renderer,
        &SNIPPET_INSTANCE,
        StatusCode::OK,
        &SnippetRepresentation::new(&snippet, &links),
    )
}

/// `PUT` replaces the writable fields, `PATCH` changes only those sent.
pub async fn update(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Lookup>,
    user_data: Option<web::ReqData<UserData>>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), SNIPPET_INSTANCE.renderers)?;
    let user = user_data.as_deref();
    permissions::authenticated_or_read_only(req.method(), user)?;

    let mut snippet = lookup(&app_data, &path).await?;
    permissions::owner_or_read_only(req.method(), user, &snippet)?;

    let mode = if req.method() == Method::PATCH {
        Mode::Patch
    } else {
        Mode::Replace
    };
    let data = parsers::parse(&req, &body)?;
    snippet::validate(&data, mode)?.apply(&mut snippet);

    let saved = db::snippets::save(&app_data.db, &app_data.highlighter, &snippet).await?;
    log::info!("{} updated snippet {}", saved.owner, saved.id);

    let links = Links::new(&req, path.format.as_deref());
    render(
        &req,
        renderer,
        &SNIPPET_INSTANCE,
        StatusCode::OK,
        &SnippetRepresentation::new(&saved, &links),
    )
}

pub async fn destroy(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Lookup>,
    user_data: Option<web::ReqData<UserData>>,
) -> Result<HttpResponse, AppError> {
    negotiate(&req, path.format.as_deref(), SNIPPET_INSTANCE.renderers)?;
    let user = user_data.as_deref();
    permissions::authenticated_or_read_only(req.method(), user)?;

    let snippet = lookup(&app_data, &path).await?;
    permissions::owner_or_read_only(req.method(), user, &snippet)?;

    if !db::snippets::delete(&app_data.db, snippet.id).await? {
        return Err(AppError::NotFound);
    }
    log::info!("{} deleted snippet {}", snippet.owner, snippet.id);

    Ok(HttpResponse::NoContent()
        .insert_header((header::ALLOW, SNIPPET_INSTANCE.allow.join(", ")))
        .insert_header((header::VARY, "Accept"))
        .finish())
}

/// The stored highlighted page, served as-is.
pub async fn highlight(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Lookup>,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), SNIPPET_HIGHLIGHT.renderers)?;
    let snippet = lookup(&app_data, &path).await?;

    render(
        &req,
        renderer,
        &SNIPPET_HIGHLIGHT,
        StatusCode::OK,
        &snippet.highlighted,
    )
}
