use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use bcrypt::{hash, verify};
use serde::Serialize;

use crate::{
    db,
    error::{AppError, ValidationErrors},
    handlers::{Suffix, LOGIN, REGISTER},
    parsers,
    renderers::{negotiate, render},
    serializers::{
        user::{validate_credentials, validate_registration},
        UserRepresentation,
    },
    utils::{auth::issue_token, links::Links},
    AppState,
};

pub async fn register(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    path: web::Path<Suffix>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), REGISTER.renderers)?;
    let registration = validate_registration(&parsers::parse(&req, &body)?)?;

    let cost = app_state.settings.bcrypt_cost;
    let password = registration.password;
    let password_hash = web::block(move || hash(password, cost)).await??;

    let user = match db::users::create(&app_state.db, &registration.username, &password_hash).await
    {
        Ok(user) => user,
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            let mut errors = ValidationErrors::default();
            errors.add("username", "A user with that username already exists.");
            return Err(errors.into());
        }
        Err(err) => return Err(err.into()),
    };
    log::info!("registered user {} ({})", user.username, user.id);

    let links = Links::new(&req, None);
    render(
        &req,
        renderer,
        &REGISTER,
        StatusCode::CREATED,
        &UserRepresentation::new(&user, &[], &links),
    )
}

#[derive(Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
    expires_in: i64,
}

pub async fn login(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    path: web::Path<Suffix>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let renderer = negotiate(&req, path.format.as_deref(), LOGIN.renderers)?;
    let credentials = validate_credentials(&parsers::parse(&req, &body)?)?;
    let rejected = || ValidationErrors::non_field("Unable to log in with provided credentials.");

    let Some(user) = db::users::find_by_username(&app_state.db, &credentials.username).await?
    else {
        log::debug!("login for unknown user {}", credentials.username);
        return Err(rejected().into());
    };

    let password = credentials.password;
    let password_hash = user.password_hash.clone();
    if !web::block(move || verify(password, &password_hash)).await?? {
        log::debug!("wrong password for {}", user.username);
        return Err(rejected().into());
    }

    let token = issue_token(&app_state.settings, &user)?;
    render(
        &req,
        renderer,
        &LOGIN,
        StatusCode::OK,
        &TokenResponse {
            access_token: token.token,
            token_type: "Bearer",
            expires_in: token.expires_in,
        },
    )
}
