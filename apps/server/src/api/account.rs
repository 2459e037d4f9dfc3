use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::routing::get;
use axum::{Json, Router};

use papertrade_core::ledger::Transaction;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{AccountView, UserView};
use crate::session::CurrentUser;

/// Account page view-model: identity, derived balance and the full ledger.
async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<AccountView>> {
    let balance = state.ledger_service.get_balance(&user.id)?;
    let transactions = state.ledger_service.get_transactions(&user.id)?;
    Ok(Json(AccountView {
        user: user.into(),
        balance,
        transactions,
    }))
}

async fn get_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserView> {
    Json(user.into())
}

async fn get_user_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<f64>> {
    let balance = state.ledger_service.get_balance(&user.id)?;
    Ok(Json(balance))
}

async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.ledger_service.get_transactions(&user.id)?;
    Ok(Json(transactions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/account", get(get_account))
        .route("/user", get(get_user))
        .route("/user_balance", get(get_user_balance))
        .route("/transactions", get(get_transactions))
}
