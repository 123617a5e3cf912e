use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::application::ports::{CredentialError, PasswordHasher};

/// Argon2id with the crate's default parameters, PHC string output
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        use argon2::password_hash::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| CredentialError::Hashing(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CredentialError::Hashing(e.to_string())),
        }
    }
}
