use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Advert;
use crate::domain::value_objects::{AdvertId, ImageId, UserId};
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An insert reported zero affected rows
    #[error("Row was not created: {0}")]
    NotCreated(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

/// Port for advert persistence.
///
/// Every mutating method runs in a single transaction: when it returns an
/// error, nothing it wrote is visible.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdvertRepository: Send + Sync {
    /// Insert the advert row and one metadata row per image
    async fn create_advert(&self, advert: &Advert) -> Result<AdvertId, RepositoryError>;

    /// Soft-delete the advert owned by `owner_id` and all of its images.
    ///
    /// Returns the ids of the images marked deleted. `NotFound` covers both
    /// a missing advert and one owned by somebody else.
    async fn delete_advert(
        &self,
        id: &AdvertId,
        owner_id: &UserId,
    ) -> Result<Vec<ImageId>, RepositoryError>;

    /// Live advert with its live images only
    async fn get_advert_by_id(&self, id: &AdvertId) -> Result<Advert, RepositoryError>;
}
