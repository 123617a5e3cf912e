//! Error types shared by the use cases
//!
//! Validation and storage failures propagate unchanged; a failed cleanup of
//! image bytes never shows up here (see `compensation`).

use thiserror::Error;

use crate::application::ports::{CredentialError, ImageStoreError, RepositoryError};
use crate::domain::errors::DomainError;

/// Error type for advert and image use cases
#[derive(Debug, Error)]
pub enum AdvertError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    /// Missing, deleted, or not owned by the caller. Deliberately not
    /// distinguished further.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Image store error: {0}")]
    ImageStore(#[from] ImageStoreError),
}

impl From<RepositoryError> for AdvertError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => AdvertError::NotFound(msg),
            other => AdvertError::Repository(other),
        }
    }
}

/// Error type for sign-up and sign-in
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}
