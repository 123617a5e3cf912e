use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::application::compensation::WrittenImages;
use crate::application::dto::CreateAdvertRequest;
use crate::application::errors::AdvertError;
use crate::application::ports::{AdvertRepository, Clock, IdGenerator, ImageStore, ImageStoreError};
use crate::domain::entities::Advert;
use crate::domain::validation::validate_advert;
use crate::domain::value_objects::{AdvertId, ImageId, UserId};

/// Use case: create an advert together with its images.
///
/// Image bytes go to the store first, then one repository transaction
/// inserts the advert and image rows. If the transaction does not commit,
/// the bytes written for this advert are removed before the error is
/// returned. If an image write fails, the images written before it are
/// removed and the repository is never touched.
pub struct CreateAdvertUseCase {
    advert_repo: Arc<dyn AdvertRepository>,
    image_store: Arc<dyn ImageStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl CreateAdvertUseCase {
    pub fn new(
        advert_repo: Arc<dyn AdvertRepository>,
        image_store: Arc<dyn ImageStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            advert_repo,
            image_store,
            clock,
            ids,
        }
    }

    /// Execute create workflow
    #[instrument(skip(self, request), fields(owner_id = %owner_id, images = request.images.len()))]
    pub async fn execute(
        &self,
        request: CreateAdvertRequest,
        owner_id: &UserId,
    ) -> Result<AdvertId, AdvertError> {
        // 1. Validate before any side effect
        let fields = validate_advert(
            &request.title,
            &request.description,
            request.price,
            request.images.len(),
        )?;

        // 2. Assign identifiers and timestamps
        let now = self.clock.now();
        let mut advert = Advert::new(AdvertId::from(self.ids.generate()), fields, *owner_id, now);
        for payload in request.images {
            advert.attach_image(ImageId::from(self.ids.generate()), payload);
        }

        // 3. Write image bytes, first failure wins
        let written = self.write_images(&advert).await?;

        // 4. Insert advert and image rows in one transaction
        match self.advert_repo.create_advert(&advert).await {
            Ok(id) => {
                written.commit();
                advert.discard_payloads();
                info!(advert_id = %id, "advert created");
                Ok(id)
            }
            Err(e) => {
                error!(
                    advert_id = %advert.id(),
                    image_ids = ?written.ids(),
                    error = %e,
                    "advert transaction failed"
                );
                written.compensate("create advert: transaction").await;
                Err(e.into())
            }
        }
    }

    /// Writes every payload in order. On the first failure the files already
    /// written are removed and the store error is returned.
    async fn write_images(&self, advert: &Advert) -> Result<WrittenImages<'_>, AdvertError> {
        let mut written = WrittenImages::new(self.image_store.as_ref());
        for image in advert.images() {
            let result = match image.payload() {
                Some(payload) => self.image_store.save(image.id(), payload.clone()).await,
                None => Err(ImageStoreError::Internal(format!(
                    "image {} has no payload",
                    image.id()
                ))),
            };

            if let Err(e) = result {
                error!(
                    advert_id = %advert.id(),
                    image_id = %image.id(),
                    error = %e,
                    "failed to write image"
                );
                written.compensate("create advert: image write").await;
                return Err(AdvertError::ImageStore(e));
            }
            written.record(*image.id());
        }
        Ok(written)
    }
}
