use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::domain::value_objects::ImageId;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for image byte storage, keyed by image id.
///
/// The store has no transactional join with the relational database.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write the bytes for `id`, replacing anything stored under it
    async fn save(&self, id: &ImageId, data: Bytes) -> Result<(), ImageStoreError>;

    async fn read(&self, id: &ImageId) -> Result<Bytes, ImageStoreError>;

    /// Remove the bytes for `id`. Deleting a missing key succeeds.
    async fn delete(&self, id: &ImageId) -> Result<(), ImageStoreError>;

    async fn exists(&self, id: &ImageId) -> Result<bool, ImageStoreError>;
}
