use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use papertrade_core::auth::{AuthService, InMemorySessionStore, SessionStore};
use papertrade_core::db;
use papertrade_core::instruments::{InstrumentRepository, InstrumentRepositoryTrait};
use papertrade_core::ledger::{LedgerRepository, LedgerService, LedgerServiceTrait};
use papertrade_core::users::{UserRepository, UserRepositoryTrait};
use papertrade_market_data::{FinnhubProvider, MarketDataProvider};

use crate::config::Config;

pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub ledger_service: Arc<dyn LedgerServiceTrait + Send + Sync>,
    pub user_repository: Arc<dyn UserRepositoryTrait + Send + Sync>,
    pub instrument_repository: Arc<dyn InstrumentRepositoryTrait + Send + Sync>,
    pub sessions: Arc<dyn SessionStore + Send + Sync>,
    pub market_data: Arc<dyn MarketDataProvider + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if config.finnhub_api_key.is_none() {
        tracing::warn!("PT_FINNHUB_API_KEY is not set; market data will be unavailable");
    }
    let market_data: Arc<dyn MarketDataProvider + Send + Sync> = Arc::new(FinnhubProvider::new(
        config.finnhub_api_key.clone().unwrap_or_default(),
    ));
    build_state_with_provider(config, market_data)
}

/// Builds the application state around an injected market data provider.
/// Tests use this to substitute a canned provider.
pub fn build_state_with_provider(
    config: &Config,
    market_data: Arc<dyn MarketDataProvider + Send + Sync>,
) -> anyhow::Result<Arc<AppState>> {
    db::init(&config.db_path)?;
    let pool = db::create_pool(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let instrument_repository = Arc::new(InstrumentRepository::new(pool.clone()));
    let ledger_repository = Arc::new(LedgerRepository::new(pool));

    let auth_service = Arc::new(AuthService::new(user_repository.clone()));
    let ledger_service = Arc::new(LedgerService::new(
        ledger_repository,
        instrument_repository.clone(),
    ));
    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl));

    Ok(Arc::new(AppState {
        auth_service,
        ledger_service,
        user_repository,
        instrument_repository,
        sessions,
        market_data,
    }))
}
