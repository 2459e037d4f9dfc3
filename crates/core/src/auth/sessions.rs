use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::Serialize;

/// A live binding between an opaque token and a user identity.
///
/// Sessions move Anonymous -> Authenticated on login and back on logout or
/// expiry; there are no other states.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(skip_serializing)]
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Server-side session store. The token is the only thing the client ever
/// holds; everything else lives behind this trait so tests can substitute
/// their own implementation.
pub trait SessionStore: Send + Sync {
    /// Issues a new session for the given user.
    fn create(&self, user_id: &str) -> Session;

    /// Resolves a token to the owning user id. Expired or unknown tokens
    /// resolve to `None`.
    fn resolve(&self, token: &str) -> Option<String>;

    /// Drops a session. Unknown tokens are ignored.
    fn revoke(&self, token: &str);
}

/// In-memory session store with per-session expiry.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, user_id: &str) -> Session {
        let session = Session {
            token: Self::generate_token(),
            user_id: user_id.to_string(),
            expires_at: Utc::now()
                + chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero()),
        };

        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.insert(session.token.clone(), session.clone());
        session
    }

    fn resolve(&self, token: &str) -> Option<String> {
        {
            let sessions = self.sessions.read().expect("session store lock poisoned");
            match sessions.get(token) {
                Some(session) if session.expires_at > Utc::now() => {
                    return Some(session.user_id.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: purge under the write lock.
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.remove(token);
        None
    }

    fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_resolve_returns_the_user() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let session = store.create("user-1");
        assert_eq!(store.resolve(&session.token), Some("user-1".to_string()));
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let a = store.create("user-1");
        let b = store.create("user-1");
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        assert_eq!(store.resolve("nonsense"), None);
    }

    #[test]
    fn revoked_session_no_longer_resolves() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let session = store.create("user-1");
        store.revoke(&session.token);
        assert_eq!(store.resolve(&session.token), None);
    }

    #[test]
    fn expired_session_resolves_to_none() {
        let store = InMemorySessionStore::new(Duration::ZERO);
        let session = store.create("user-1");
        assert_eq!(store.resolve(&session.token), None);
    }
}
