use std::sync::Arc;

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use log::{debug, warn};
use rand::rngs::OsRng;

use crate::auth::{AuthError, Result};
use crate::users::{NewUser, User, UserRepositoryTrait};

/// Gate in front of the user table: owns password hashing and credential
/// checks. Hashing is CPU-bound; callers on an async runtime are expected
/// to run these methods on a blocking pool.
pub struct AuthService {
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl AuthService {
    /// Creates a new AuthService instance with an injected repository
    pub fn new(user_repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { user_repository }
    }

    /// Registers a new user. Fails with `Conflict` when the username is
    /// taken; the unique constraint backs this up under concurrent
    /// registration of the same name.
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        validate_credentials(username, password)?;

        if self.user_repository.find_by_username(username)?.is_some() {
            return Err(AuthError::Conflict(format!(
                "Username {} is already registered",
                username
            )));
        }

        let password_hash = hash_password(password)?;
        let user = self.user_repository.create(NewUser {
            username: username.to_string(),
            password_hash,
        })?;

        debug!("registered user {}", user.id);
        Ok(user)
    }

    /// Verifies credentials against the stored hash. Unknown usernames and
    /// wrong passwords produce the same `Unauthorized` error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = match self.user_repository.find_by_username(username)? {
            Some(user) => user,
            None => {
                // Burn a verification anyway so the timing of the reply does
                // not reveal whether the username exists.
                let _ = verify_password(password, dummy_hash());
                return Err(AuthError::Unauthorized);
            }
        };

        match verify_password(password, &user.password_hash) {
            Ok(()) => Ok(user),
            Err(AuthError::Unauthorized) => {
                warn!("failed login attempt for user {}", user.id);
                Err(AuthError::Unauthorized)
            }
            Err(other) => Err(other),
        }
    }

    /// Hashes and persists a new password for an existing user.
    pub fn change_password(&self, user_id: &str, new_password: &str) -> Result<()> {
        if new_password.is_empty() {
            return Err(AuthError::InvalidData(
                "Password cannot be empty".to_string(),
            ));
        }

        let new_hash = hash_password(new_password)?;
        self.user_repository.update_password(user_id, &new_hash)?;
        debug!("password changed for user {}", user_id);
        Ok(())
    }
}

// Hash of a throwaway password, used to equalize the work done on
// unknown-username logins. Computed once per process.
fn dummy_hash() -> &'static str {
    use std::sync::OnceLock;
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("papertrade-dummy").unwrap_or_default())
}

fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidData(
            "Username cannot be empty".to_string(),
        ));
    }
    if username.len() > 64 {
        return Err(AuthError::InvalidData(
            "Username cannot exceed 64 characters".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidData(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Hashes a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))
}

/// Verifies a candidate password against a stored hash. The comparison
/// inside argon2 is constant-time.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AuthError::Internal(format!("Stored password hash is invalid: {e}")))?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|err| match err {
            PasswordHashError::Password => AuthError::Unauthorized,
            other => AuthError::Internal(format!("Password verification failed: {other}")),
        })
}
