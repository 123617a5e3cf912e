use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::application::errors::AuthError;
use crate::application::ports::{CredentialError, PasswordHasher, TokenService, UserRepository};
use crate::domain::value_objects::Email;

/// Password hashed once per use case and verified against when no account
/// matches, so unknown emails cost the same as wrong passwords.
const DECOY_PASSWORD: &str = "decoy-Password-1";

/// Use case: exchange email and password for a bearer token
///
/// Unknown email, deleted account and wrong password all yield
/// `AuthError::InvalidCredentials`, after the same amount of hashing work.
pub struct SignInUseCase {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    decoy_hash: OnceCell<String>,
}

impl SignInUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
            decoy_hash: OnceCell::new(),
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = match self.user_repo.get_user_by_email(&email).await {
            Ok(user) if !user.is_deleted() => user,
            Ok(_) => {
                debug!("sign-in for deleted account");
                self.verify_decoy(password).await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) if e.is_not_found() => {
                self.verify_decoy(password).await;
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        if !self.verify(password, user.password_hash().to_string()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id())?;
        info!(user_id = %user.id(), "user signed in");
        Ok(token)
    }

    async fn verify(&self, password: &str, hash: String) -> Result<bool, CredentialError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))?
    }

    /// Burns one verification; the outcome is ignored
    async fn verify_decoy(&self, password: &str) {
        let hasher = Arc::clone(&self.hasher);
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(move || hasher.hash(DECOY_PASSWORD))
                    .await
                    .map_err(|e| CredentialError::Hashing(e.to_string()))?
            })
            .await;

        match decoy {
            Ok(hash) => {
                if let Err(e) = self.verify(password, hash.clone()).await {
                    debug!(error = %e, "decoy verification failed");
                }
            }
            Err(e) => debug!(error = %e, "decoy hash unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockPasswordHasher, MockTokenService, MockUserRepository, RepositoryError,
    };
    use crate::domain::entities::User;
    use crate::domain::value_objects::UserId;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(deleted: bool) -> User {
        let now = Utc::now();
        User::reconstruct(
            UserId::from_uuid(Uuid::new_v4()),
            Email::parse("anna@example.com").unwrap(),
            "stored-hash".to_string(),
            now,
            now,
            deleted,
        )
    }

    fn use_case(
        repo: MockUserRepository,
        hasher: MockPasswordHasher,
        tokens: MockTokenService,
    ) -> SignInUseCase {
        SignInUseCase::new(Arc::new(repo), Arc::new(hasher), Arc::new(tokens))
    }

    #[tokio::test]
    async fn test_sign_in_issues_token_for_user() {
        let stored = user(false);
        let user_id = *stored.id();
        let mut repo = MockUserRepository::new();
        let mut hasher = MockPasswordHasher::new();
        let mut tokens = MockTokenService::new();

        repo.expect_get_user_by_email()
            .returning(move |_| Ok(stored.clone()));
        hasher
            .expect_verify()
            .withf(|password, hash| password == "Secret12" && hash == "stored-hash")
            .returning(|_, _| Ok(true));
        tokens
            .expect_issue()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|_| Ok("jwt".to_string()));

        let token = use_case(repo, hasher, tokens)
            .execute("anna@example.com", "Secret12")
            .await
            .unwrap();

        assert_eq!(token, "jwt");
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let stored = user(false);
        let mut repo = MockUserRepository::new();
        let mut hasher = MockPasswordHasher::new();
        let mut tokens = MockTokenService::new();

        repo.expect_get_user_by_email()
            .returning(move |_| Ok(stored.clone()));
        hasher.expect_verify().returning(|_, _| Ok(false));
        tokens.expect_issue().never();

        let err = use_case(repo, hasher, tokens)
            .execute("anna@example.com", "Wrong123")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_password_verification() {
        let mut repo = MockUserRepository::new();
        let mut hasher = MockPasswordHasher::new();
        let mut tokens = MockTokenService::new();
        repo.expect_get_user_by_email()
            .times(2)
            .returning(|_| Err(RepositoryError::NotFound("user".to_string())));
        // The decoy hash is computed once and reused
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Ok("decoy-hash".to_string()));
        hasher
            .expect_verify()
            .withf(|password, hash| password == "Secret12" && hash == "decoy-hash")
            .times(2)
            .returning(|_, _| Ok(true));
        tokens.expect_issue().never();

        let sign_in = use_case(repo, hasher, tokens);
        for _ in 0..2 {
            let err = sign_in
                .execute("ghost@example.com", "Secret12")
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_deleted_user_is_invalid_credentials_after_verification() {
        let stored = user(true);
        let mut repo = MockUserRepository::new();
        let mut hasher = MockPasswordHasher::new();
        repo.expect_get_user_by_email()
            .returning(move |_| Ok(stored.clone()));
        hasher
            .expect_hash()
            .times(1)
            .returning(|_| Ok("decoy-hash".to_string()));
        hasher
            .expect_verify()
            .withf(|_, hash| hash == "decoy-hash")
            .times(1)
            .returning(|_, _| Ok(true));

        let err = use_case(repo, hasher, MockTokenService::new())
            .execute("anna@example.com", "Secret12")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_decoy_hash_failure_is_still_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        let mut hasher = MockPasswordHasher::new();
        repo.expect_get_user_by_email()
            .returning(|_| Err(RepositoryError::NotFound("user".to_string())));
        hasher
            .expect_hash()
            .returning(|_| Err(CredentialError::Hashing("no entropy".to_string())));
        hasher.expect_verify().never();

        let err = use_case(repo, hasher, MockTokenService::new())
            .execute("ghost@example.com", "Secret12")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_database_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));

        let err = use_case(repo, MockPasswordHasher::new(), MockTokenService::new())
            .execute("anna@example.com", "Secret12")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Repository(_)));
    }
}
