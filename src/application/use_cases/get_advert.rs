use std::sync::Arc;

use crate::application::dto::AdvertDto;
use crate::application::errors::AdvertError;
use crate::application::ports::AdvertRepository;
use crate::domain::value_objects::AdvertId;

/// Use case: read a live advert with its live images
pub struct GetAdvertUseCase {
    advert_repo: Arc<dyn AdvertRepository>,
}

impl GetAdvertUseCase {
    pub fn new(advert_repo: Arc<dyn AdvertRepository>) -> Self {
        Self { advert_repo }
    }

    pub async fn execute(&self, id: &AdvertId) -> Result<AdvertDto, AdvertError> {
        let advert = self.advert_repo.get_advert_by_id(id).await?;
        Ok(AdvertDto::from(advert))
    }
}
