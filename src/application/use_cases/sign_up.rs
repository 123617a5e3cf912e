use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::errors::AuthError;
use crate::application::ports::{
    Clock, CredentialError, IdGenerator, PasswordHasher, RepositoryError, UserRepository,
};
use crate::domain::entities::User;
use crate::domain::validation::validate_password;
use crate::domain::value_objects::{Email, UserId};

/// Use case: register a user by email and password
pub struct SignUpUseCase {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl SignUpUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            clock,
            ids,
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        // Argon2 is CPU bound
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))??;

        let user = User::new(
            UserId::from_uuid(self.ids.generate()),
            email,
            hash,
            self.clock.now(),
        );

        let id = self.user_repo.create_user(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        })?;

        info!(user_id = %id, "user signed up");
        Ok(id)
    }
}
