use std::sync::Arc;

use axum::extract::{Extension, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, Utc};

use papertrade_market_data::CandleSeries;

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::HomeView;
use crate::session::CurrentUser;

/// Symbols shown on the landing page.
const HOME_SYMBOLS: &[&str] = &["AAPL", "TSLA", "MSFT"];
const HOME_NEWS_LIMIT: usize = 3;

/// Landing page view-model. Market data is best-effort: a failing provider
/// degrades to empty quotes/news while the balance still renders.
async fn get_home(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<HomeView>> {
    let balance = state.ledger_service.get_balance(&user.id)?;

    let mut quotes = Vec::with_capacity(HOME_SYMBOLS.len());
    for symbol in HOME_SYMBOLS {
        match state.market_data.get_quote(symbol).await {
            Ok(quote) => quotes.push(quote),
            Err(err) => {
                tracing::warn!("quote for {} unavailable: {}", symbol, err);
            }
        }
    }

    let news = match state.market_data.get_news("general", HOME_NEWS_LIMIT).await {
        Ok(news) => news,
        Err(err) => {
            tracing::warn!("market news unavailable: {}", err);
            Vec::new()
        }
    };

    Ok(Json(HomeView {
        user: user.into(),
        balance,
        quotes,
        news,
    }))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockDataQuery {
    stock_symbol: Option<String>,
}

/// Daily candles for the charting page, defaulting to AAPL over the last
/// year, matching the frontend's expectations.
async fn get_stock_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockDataQuery>,
) -> ApiResult<Json<CandleSeries>> {
    let symbol = query.stock_symbol.unwrap_or_else(|| "AAPL".to_string());
    let to = Utc::now();
    let from = to - Duration::days(365);

    let series = state.market_data.get_candles(&symbol, from, to).await?;
    Ok(Json(series))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(get_home))
        .route("/stockData", get(get_stock_data))
}
