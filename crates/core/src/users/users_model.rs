use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::users::{Result, UserError};

/// Domain model representing a registered user.
///
/// The password hash never leaves this crate: it is skipped during
/// serialization so a `User` can be embedded in view-models directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for users
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    /// Validates the new user data
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.username.len() > 64 {
            return Err(UserError::InvalidData(
                "Username cannot exceed 64 characters".to_string(),
            ));
        }
        if self.password_hash.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Password hash cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}
