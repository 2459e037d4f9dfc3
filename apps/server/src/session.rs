use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use papertrade_core::users::User;

use crate::error::ApiError;
use crate::main_lib::AppState;

pub const SESSION_COOKIE: &str = "pt_session";

/// Page-style routes redirect to the login page when no session is
/// present; everything else answers 401.
const PAGE_ROUTES: &[&str] = &["/home", "/account", "/logout"];

/// The authenticated user for the current request, inserted by
/// [`require_session`] and read via `Extension<CurrentUser>`.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Builds the `Set-Cookie` value that hands the session token to the
/// client. HttpOnly keeps it away from page scripts.
pub fn session_cookie(token: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

/// Builds a `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extracts the session token from the request's `Cookie` header, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Guard in front of every balance-reading and ledger-mutating route:
/// resolves the session cookie to a user and stores it in the request
/// extensions, or rejects the request.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = token_from_headers(request.headers())
        .and_then(|token| state.sessions.resolve(&token))
        .map(|user_id| state.user_repository.find_by_id(&user_id));

    let user = match user {
        Some(Ok(user)) => user,
        Some(Err(papertrade_core::users::UserError::NotFound(_))) => {
            // Session points at a user the store no longer knows; treat it
            // like an expired session.
            return Ok(reject(request.uri().path()));
        }
        Some(Err(err)) => return Err(err.into()),
        None => return Ok(reject(request.uri().path())),
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

fn reject(path: &str) -> Response {
    if PAGE_ROUTES.contains(&path) {
        (StatusCode::FOUND, [(LOCATION, "/login")]).into_response()
    } else {
        ApiError::unauthenticated().into_response()
    }
}
