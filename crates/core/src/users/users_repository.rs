use std::sync::Arc;

use chrono::Utc;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::schema::users;
use crate::schema::users::dsl::*;
use crate::users::{Result, UserError};

use super::users_model::{NewUser, User, UserDB};

/// Repository for managing user records in the database
pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Creates a new user. Fails with `Conflict` if the username is taken.
    pub fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let now = Utc::now().naive_utc();
        let user_db = UserDB {
            id: uuid::Uuid::new_v4().to_string(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::Unavailable(e.to_string()))?;

        diesel::insert_into(users::table)
            .values(&user_db)
            .execute(&mut conn)
            .map_err(UserError::from)?;

        Ok(user_db.into())
    }

    /// Looks a user up by username.
    pub fn find_by_username(&self, name: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::Unavailable(e.to_string()))?;

        users
            .filter(username.eq(name))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(|e| UserError::DatabaseError(e.to_string()))
            .map(|row| row.map(User::from))
    }

    /// Retrieves a user by id.
    pub fn find_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::Unavailable(e.to_string()))?;

        let user = users
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    UserError::NotFound(format!("User with id {} not found", user_id))
                }
                _ => UserError::DatabaseError(e.to_string()),
            })?;

        Ok(user.into())
    }

    /// Replaces a user's password hash. Fails with `NotFound` when the id
    /// does not exist (detected via the affected-row count).
    pub fn update_password(&self, user_id: &str, new_hash: &str) -> Result<()> {
        if new_hash.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Password hash cannot be empty".to_string(),
            ));
        }

        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::Unavailable(e.to_string()))?;

        let affected = diesel::update(users.find(user_id))
            .set((
                password_hash.eq(new_hash),
                updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(UserError::NotFound(format!(
                "User with id {} not found",
                user_id
            )));
        }

        Ok(())
    }
}
