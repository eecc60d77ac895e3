mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use snippets_api::{app, db};

use common::{create_user, state, PASSWORD};

#[actix_web::test]
async fn register_then_login_then_create() {
    let state = state().await;
    let app = test::init_service(app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "newbie", "password": "Str0ngPassword"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "newbie");
    assert_eq!(body["snippets"], json!([]));

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"username": "newbie", "password": "Str0ngPassword"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let token = body["access_token"].as_str().unwrap().to_owned();

    let req = test::TestRequest::post()
        .uri("/snippets/")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"code": "print('mine')"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["owner"], "newbie");
}

#[actix_web::test]
async fn duplicate_usernames_are_rejected() {
    let state = state().await;
    create_user(&state, "taken").await;
    let app = test::init_service(app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/register/")
        .set_json(json!({"username": "taken", "password": "Str0ngPassword"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"username": ["A user with that username already exists."]})
    );
    assert_eq!(db::users::count(&state.db).await.unwrap(), 1);
}

#[actix_web::test]
async fn weak_passwords_are_rejected() {
    let state = state().await;
    let app = test::init_service(app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({"username": "weak", "password": "short"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"password": ["Password must be at least 8 characters long"]})
    );
}

#[actix_web::test]
async fn wrong_credentials_do_not_log_in() {
    let state = state().await;
    create_user(&state, "alice").await;
    let app = test::init_service(app(state.clone())).await;

    for (username, password) in [("alice", "WrongPass1"), ("nobody", PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"username": username, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"non_field_errors": ["Unable to log in with provided credentials."]})
        );
    }
}

#[actix_web::test]
async fn login_only_accepts_post() {
    let state = state().await;
    let app = test::init_service(app(state.clone())).await;

    let req = test::TestRequest::get().uri("/auth/login").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers().get("allow").unwrap(), "POST, OPTIONS");
}
