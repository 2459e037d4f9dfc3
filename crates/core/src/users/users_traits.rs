use super::users_model::{NewUser, User};
use super::users_repository::UserRepository;
use crate::users::Result;

/// Trait defining the contract for user repository operations.
pub trait UserRepositoryTrait: Send + Sync {
    fn create(&self, new_user: NewUser) -> Result<User>;
    fn find_by_username(&self, name: &str) -> Result<Option<User>>;
    fn find_by_id(&self, user_id: &str) -> Result<User>;
    fn update_password(&self, user_id: &str, new_hash: &str) -> Result<()>;
}

impl UserRepositoryTrait for UserRepository {
    fn create(&self, new_user: NewUser) -> Result<User> {
        UserRepository::create(self, new_user)
    }

    fn find_by_username(&self, name: &str) -> Result<Option<User>> {
        UserRepository::find_by_username(self, name)
    }

    fn find_by_id(&self, user_id: &str) -> Result<User> {
        UserRepository::find_by_id(self, user_id)
    }

    fn update_password(&self, user_id: &str, new_hash: &str) -> Result<()> {
        UserRepository::update_password(self, user_id, new_hash)
    }
}
