#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::value_objects::UserId;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(String),
}

/// Salted one-way password hashing
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// `Ok(false)` for a wrong password; errors are reserved for malformed hashes
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Issues and checks bearer tokens carrying a user id
#[cfg_attr(test, automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<String, CredentialError>;

    fn verify(&self, token: &str) -> Result<UserId, CredentialError>;
}
