mod common;

use axum::http::{header, StatusCode};
use serde_json::json;

use common::{body_json, get, post_json, register_and_login, session_cookie_from, test_app};

#[tokio::test]
async fn welcome_is_public() {
    let app = test_app(false);

    let response = get(&app.router, "/welcome", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn unauthenticated_page_requests_redirect_to_login() {
    let app = test_app(false);

    for uri in ["/home", "/account", "/logout"] {
        let response = get(&app.router, uri, None).await;
        assert_eq!(response.status(), StatusCode::FOUND, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}

#[tokio::test]
async fn unauthenticated_api_requests_get_401() {
    let app = test_app(false);

    for uri in ["/user", "/user_balance", "/transactions"] {
        let response = get(&app.router, uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let response = post_json(
        &app.router,
        "/transactShares",
        json!({ "stockName": "AAPL", "type": "buy", "shares": 1.0, "price": 100.0 }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_redirects_to_login() {
    let app = test_app(false);

    let response = post_json(
        &app.router,
        "/register",
        json!({ "username": "alice", "password": "s3cret-pw" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = test_app(false);

    let body = json!({ "username": "alice", "password": "s3cret-pw" });
    let response = post_json(&app.router, "/register", body.clone(), None).await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let response = post_json(&app.router, "/register", body, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_rejects_blank_credentials() {
    let app = test_app(false);

    let response = post_json(
        &app.router,
        "/register",
        json!({ "username": "", "password": "s3cret-pw" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app(false);

    post_json(
        &app.router,
        "/register",
        json!({ "username": "alice", "password": "s3cret-pw" }),
        None,
    )
    .await;

    let response = post_json(
        &app.router,
        "/login",
        json!({ "username": "alice", "password": "wrong" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = test_app(false);

    let response = post_json(
        &app.router,
        "/login",
        json!({ "username": "nobody", "password": "whatever" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_sets_a_session_cookie_that_unlocks_the_account() {
    let app = test_app(false);
    let cookie = register_and_login(&app.router, "alice", "s3cret-pw").await;

    let response = get(&app.router, "/user", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let app = test_app(false);
    let cookie = register_and_login(&app.router, "alice", "s3cret-pw").await;

    let response = get(&app.router, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let response = get(&app.router, "/user", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_round_trip() {
    let app = test_app(false);
    let cookie = register_and_login(&app.router, "alice", "s3cret-pw").await;

    let response = post_json(
        &app.router,
        "/change_password",
        json!({ "password": "n3w-pw" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/account");

    // Old password no longer works.
    let response = post_json(
        &app.router,
        "/login",
        json!({ "username": "alice", "password": "s3cret-pw" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New one does.
    let response = post_json(
        &app.router,
        "/login",
        json!({ "username": "alice", "password": "n3w-pw" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    session_cookie_from(&response);
}

#[tokio::test]
async fn login_page_renders_with_and_without_an_error() {
    let app = test_app(false);

    let response = get(&app.router, "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["page"], "login");
    assert!(body.get("error").is_none());

    let response = get(&app.router, "/login?error=bad%20credentials", None).await;
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad credentials");
}

#[tokio::test]
async fn garbage_cookie_is_treated_as_unauthenticated() {
    let app = test_app(false);

    let response = get(&app.router, "/user", Some("pt_session=not-a-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
