#![allow(dead_code)]

use actix_web::web;
use snippets_api::{
    config::Settings,
    db,
    highlight::Highlighter,
    models::{NewSnippet, Snippet, User},
    utils::auth::issue_token,
    AppState,
};

pub const PASSWORD: &str = "Password123";

pub async fn state() -> web::Data<AppState> {
    let settings = Settings {
        jwt_secret: "test-secret".into(),
        bcrypt_cost: 4,
        ..Settings::default()
    };
    web::Data::new(AppState {
        db: db::connect("sqlite::memory:").await.unwrap(),
        highlighter: Highlighter::new(),
        settings,
    })
}

pub async fn create_user(state: &AppState, username: &str) -> User {
    let hash = bcrypt::hash(PASSWORD, 4).unwrap();
    db::users::create(&state.db, username, &hash).await.unwrap()
}

pub fn bearer(state: &AppState, user: &User) -> (&'static str, String) {
    let token = issue_token(&state.settings, user).unwrap();
    ("Authorization", format!("Bearer {}", token.token))
}

pub async fn create_snippet(state: &AppState, owner: &User, code: &str) -> Snippet {
    db::snippets::insert(&state.db, &state.highlighter, owner.id, &NewSnippet::new(code))
        .await
        .unwrap()
}
