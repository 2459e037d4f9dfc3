// Module declarations
pub(crate) mod auth_errors;
pub(crate) mod auth_service;
pub(crate) mod sessions;

// Re-export the public interface
pub use auth_service::{hash_password, verify_password, AuthService};
pub use sessions::{InMemorySessionStore, Session, SessionStore};

// Re-export error types for convenience
pub use auth_errors::{AuthError, Result};
