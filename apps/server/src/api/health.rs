use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use crate::main_lib::AppState;
use crate::models::WelcomeResponse;

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        status: "success",
        message: "Welcome!",
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/welcome", get(welcome))
}
