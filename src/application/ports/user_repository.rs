use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::User;
use crate::domain::value_objects::{Email, UserId};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for user persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken email is `RepositoryError::Conflict`
    async fn create_user(&self, user: &User) -> Result<UserId, RepositoryError>;

    async fn get_user_by_email(&self, email: &Email) -> Result<User, RepositoryError>;
}
