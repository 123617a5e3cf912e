use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::Image;
use crate::domain::value_objects::ImageId;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for image metadata lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Image metadata row regardless of its deleted flag
    async fn get_image_by_id(&self, id: &ImageId) -> Result<Image, RepositoryError>;
}
