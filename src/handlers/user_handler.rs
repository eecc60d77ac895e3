use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};

use crate::{
    db,
    error::AppError,
    handlers::{Lookup, Suffix, USER_INSTANCE, USER_LIST},
    renderers::{negotiate, render},
    serializers::UserRepresentation,
    utils::{
        links::Links,
        pagination::{requested_page, Page, Paginated},
    },
    AppState,
};

pub async fn list(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Suffix>,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), USER_LIST.renderers)?;

    let count = db::users::count(&app_data.db).await?;
    let requested = requested_page(&req)?;
    let page = Page::resolve(requested.as_deref(), count, app_data.settings.page_size)?;
    let users = db::users::list(&app_data.db, page.limit(), page.offset()).await?;

    let links = Links::new(&req, path.format.as_deref());
    let mut results = Vec::with_capacity(users.len());
    for user in &users {
        let snippet_ids = db::users::snippet_ids(&app_data.db, user.id).await?;
        results.push(UserRepresentation::new(user, &snippet_ids, &links));
    }

    render(
        &req,
        renderer,
        &USER_LIST,
        StatusCode::OK,
        &Paginated::new(&req, page, count, results),
    )
}

pub async fn retrieve(
    req: HttpRequest,
    app_data: web::Data<AppState>,
    path: web::Path<Lookup>,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), USER_INSTANCE.renderers)?;

    let user = db::users::fetch(&app_data.db, path.id()?)
        .await?
        .ok_or(AppError::NotFound)?;
    let snippet_ids = db::users::snippet_ids(&app_data.db, user.id).await?;

    let links = Links::new(&req, path.format.as_deref());
    render(
        &req,
        renderer,
        &USER_INSTANCE,
        StatusCode::OK,
        &UserRepresentation::new(&user, &snippet_ids, &links),
    )
}
