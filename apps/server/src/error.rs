use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use papertrade_core::auth::AuthError;
use papertrade_core::instruments::InstrumentError;
use papertrade_core::ledger::LedgerError;
use papertrade_core::users::UserError;
use papertrade_market_data::MarketDataError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error as it leaves the HTTP layer. Internal detail is logged, never
/// returned to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ApiErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Not authenticated")
    }

    fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!("internal error: {}", detail);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    fn unavailable(detail: impl std::fmt::Display) -> Self {
        tracing::warn!("dependency unavailable: {}", detail);
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            code: self.status.as_u16(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, err.to_string()),
            AuthError::Unauthenticated => Self::unauthenticated(),
            AuthError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            AuthError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            AuthError::InvalidData(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            AuthError::Unavailable(detail) => Self::unavailable(detail),
            AuthError::Internal(detail) => Self::internal(detail),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            LedgerError::InvalidData(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            LedgerError::Unavailable(detail) => Self::unavailable(detail),
            LedgerError::DatabaseError(detail) => Self::internal(detail),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            UserError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg),
            UserError::InvalidData(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            UserError::Unavailable(detail) => Self::unavailable(detail),
            UserError::DatabaseError(detail) => Self::internal(detail),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            InstrumentError::Unavailable(detail) => Self::unavailable(detail),
            InstrumentError::DatabaseError(detail) => Self::internal(detail),
        }
    }
}

impl From<MarketDataError> for ApiError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::SymbolNotFound(symbol) => Self::new(
                StatusCode::NOT_FOUND,
                format!("Symbol {} not found", symbol),
            ),
            other => Self::unavailable(other),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(err)
    }
}
