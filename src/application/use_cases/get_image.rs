use bytes::Bytes;
use std::sync::Arc;
use tracing::warn;

use crate::application::dto::ImageDto;
use crate::application::errors::AdvertError;
use crate::application::ports::{ImageRepository, ImageStore, ImageStoreError};
use crate::domain::value_objects::ImageId;

/// Use case: fetch the bytes of a live image
pub struct GetImageUseCase {
    image_repo: Arc<dyn ImageRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl GetImageUseCase {
    pub fn new(image_repo: Arc<dyn ImageRepository>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            image_repo,
            image_store,
        }
    }

    pub async fn execute(&self, id: &ImageId) -> Result<(ImageDto, Bytes), AdvertError> {
        let image = self.image_repo.get_image_by_id(id).await?;
        if image.is_deleted() {
            return Err(AdvertError::NotFound(format!("image {id}")));
        }

        let data = self.image_store.read(id).await.map_err(|e| match e {
            ImageStoreError::NotFound(_) => {
                warn!(image_id = %id, "live image row without stored bytes");
                AdvertError::NotFound(format!("image {id}"))
            }
            other => AdvertError::ImageStore(other),
        })?;

        Ok((ImageDto::from(&image), data))
    }
}
