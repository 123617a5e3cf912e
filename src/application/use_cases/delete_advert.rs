use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::application::compensation::remove_images;
use crate::application::dto::DeleteAdvertReport;
use crate::application::errors::AdvertError;
use crate::application::ports::{AdvertRepository, ImageStore};
use crate::domain::value_objects::{AdvertId, UserId};

/// Use case: soft-delete an advert and remove its image bytes.
///
/// The soft-delete transaction is authoritative. Image bytes are removed
/// only after it commits, one attempt per image; a failed removal leaks
/// bytes on disk but never reverts the deletion.
pub struct DeleteAdvertUseCase {
    advert_repo: Arc<dyn AdvertRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl DeleteAdvertUseCase {
    pub fn new(advert_repo: Arc<dyn AdvertRepository>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            advert_repo,
            image_store,
        }
    }

    /// Execute delete workflow
    #[instrument(skip(self), fields(advert_id = %id, owner_id = %owner_id))]
    pub async fn execute(
        &self,
        id: &AdvertId,
        owner_id: &UserId,
    ) -> Result<DeleteAdvertReport, AdvertError> {
        // 1. Soft-delete advert and images; ownership is part of the UPDATE filter
        let image_ids = self
            .advert_repo
            .delete_advert(id, owner_id)
            .await
            .inspect_err(|e| {
                if e.is_not_found() {
                    debug!("advert missing or not owned by caller");
                }
            })?;

        // 2. Remove image bytes, best effort
        let failures =
            remove_images(self.image_store.as_ref(), &image_ids, "delete advert").await;
        if !failures.is_empty() {
            warn!(
                leaked = failures.len(),
                "advert deleted but some image bytes remain in store"
            );
        }

        info!(images = image_ids.len(), "advert deleted");

        Ok(DeleteAdvertReport {
            leaked_image_ids: failures.iter().map(|f| f.image_id).collect(),
            image_ids,
        })
    }
}
