use std::sync::Arc;

use axum::extract::{Extension, Query, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{AuthPageView, ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::session::{clear_session_cookie, session_cookie, token_from_headers, CurrentUser};

/// 302 redirect; login/registration flows are driven by a browser form.
fn found(location: &'static str) -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, location)])
}

#[derive(serde::Deserialize)]
struct PageQuery {
    error: Option<String>,
}

async fn login_page(Query(query): Query<PageQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "login",
        error: query.error,
    })
}

async fn register_page(Query(query): Query<PageQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "register",
        error: query.error,
    })
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    // Argon2 verification is CPU-bound; keep it off the request threads so
    // a burst of logins cannot starve unrelated requests.
    let auth = state.auth_service.clone();
    let user =
        tokio::task::spawn_blocking(move || auth.authenticate(&body.username, &body.password))
            .await??;

    let session = state.sessions.create(&user.id);
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0) as u64;
    tracing::info!(user_id = %user.id, "login");

    Ok((
        [(SET_COOKIE, session_cookie(&session.token, max_age))],
        found("/home"),
    ))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let auth = state.auth_service.clone();
    let user = tokio::task::spawn_blocking(move || auth.register(&body.username, &body.password))
        .await??;

    tracing::info!(user_id = %user.id, "registered");
    Ok(found("/login"))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.revoke(&token);
    }
    tracing::info!(user_id = %user.id, "logout");
    ([(SET_COOKIE, clear_session_cookie())], found("/login"))
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<ChangePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let auth = state.auth_service.clone();
    let user_id = user.id.clone();
    tokio::task::spawn_blocking(move || auth.change_password(&user_id, &body.password)).await??;

    tracing::info!(user_id = %user.id, "password changed");
    Ok(found("/account"))
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
}

pub fn session_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logout", get(logout))
        .route("/change_password", post(change_password))
}
