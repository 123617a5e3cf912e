//! Best-effort removal of image bytes around the advert transaction
//!
//! The relational transaction is the durability boundary. Image bytes are
//! written before it and removed again if it does not commit; after a
//! committed soft-delete they are removed for good. Neither removal can be
//! rolled back or retried, so failures are logged and reported to the
//! caller as data, never as an error.

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::application::ports::{ImageStore, ImageStoreError};
use crate::domain::value_objects::ImageId;

/// A single image whose bytes could not be removed. Logged only.
#[derive(Debug, Error)]
#[error("failed to remove image {image_id} during {operation}: {source}")]
pub struct CompensationError {
    pub image_id: ImageId,
    pub operation: &'static str,
    #[source]
    pub source: ImageStoreError,
}

/// Delete every image in `image_ids` from the store.
///
/// Each deletion is attempted exactly once and independently of the others.
pub async fn remove_images(
    store: &dyn ImageStore,
    image_ids: &[ImageId],
    operation: &'static str,
) -> Vec<CompensationError> {
    let mut failures = Vec::new();

    for image_id in image_ids {
        match store.delete(image_id).await {
            Ok(()) => debug!(%image_id, operation, "image removed from store"),
            Err(source) => {
                let failure = CompensationError {
                    image_id: *image_id,
                    operation,
                    source,
                };
                error!(%image_id, operation, error = %failure, "image removal failed");
                failures.push(failure);
            }
        }
    }

    failures
}

/// Images written to the store during one create, pending the transaction.
///
/// Must be settled with [`WrittenImages::commit`] or
/// [`WrittenImages::compensate`]; dropping it unsettled (for example when the
/// request future is cancelled) leaves the bytes behind and logs a warning.
pub struct WrittenImages<'a> {
    store: &'a dyn ImageStore,
    written: Vec<ImageId>,
}

impl<'a> WrittenImages<'a> {
    pub fn new(store: &'a dyn ImageStore) -> Self {
        Self {
            store,
            written: Vec::new(),
        }
    }

    pub fn record(&mut self, image_id: ImageId) {
        self.written.push(image_id);
    }

    pub fn ids(&self) -> &[ImageId] {
        &self.written
    }

    /// The transaction committed: the store now owns the bytes
    pub fn commit(mut self) {
        self.written.clear();
    }

    /// Undo every recorded write
    pub async fn compensate(mut self, operation: &'static str) -> Vec<CompensationError> {
        let written = std::mem::take(&mut self.written);
        if written.is_empty() {
            return Vec::new();
        }

        warn!(count = written.len(), operation, "removing images written before failure");
        remove_images(self.store, &written, operation).await
    }
}

impl Drop for WrittenImages<'_> {
    fn drop(&mut self) {
        if !self.written.is_empty() {
            warn!(
                image_ids = ?self.written,
                "image writes abandoned without commit or compensation; bytes left in store"
            );
        }
    }
}
