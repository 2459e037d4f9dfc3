use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;
use crate::session::require_session;

mod account;
mod auth;
mod health;
mod ledger;
mod market;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let public = Router::new()
        .merge(health::router())
        .merge(auth::public_router());

    let guarded = Router::new()
        .merge(auth::session_router())
        .merge(account::router())
        .merge(ledger::router())
        .merge(market::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public)
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .with_state(state)
}
