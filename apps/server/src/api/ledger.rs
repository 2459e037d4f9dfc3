use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use papertrade_core::instruments::Instrument;
use papertrade_core::ledger::Transaction;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::TransactRequest;
use crate::session::CurrentUser;

/// Posts a buy or sell against the caller's ledger and returns the created
/// entry. The new balance is derived on the next read; nothing is stored.
async fn transact_shares(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<TransactRequest>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.ledger_service.post_transaction(
        &user.id,
        &body.stock_name,
        body.transaction_type,
        body.shares,
        body.price,
        body.date.unwrap_or_else(Utc::now),
    )?;

    tracing::info!(
        user_id = %user.id,
        transaction_id = %transaction.id,
        "posted {} for amount {}",
        transaction.transaction_type,
        transaction.amount
    );
    Ok(Json(transaction))
}

/// The tradable symbols, for the trade form's instrument picker.
async fn list_instruments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Instrument>>> {
    let instruments = state.instrument_repository.list()?;
    Ok(Json(instruments))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactShares", post(transact_shares))
        .route("/instruments", get(list_instruments))
}
