use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{ImageStore, ImageStoreError};
use crate::domain::value_objects::ImageId;
use crate::infrastructure::storage::PathBuilder;

/// Image store on the local filesystem.
///
/// Writes land in a temp file first and are renamed into place, so a reader
/// never sees a partially written image.
pub struct LocalImageStore {
    path_builder: PathBuilder,
    durable_writes: bool,
    precreate_dirs: bool,
}

impl LocalImageStore {
    pub fn new(root: PathBuf) -> Self {
        Self::with_options(root, true, true)
    }

    pub fn with_durability(root: PathBuf, durable_writes: bool) -> Self {
        Self::with_options(root, durable_writes, true)
    }

    pub fn with_options(root: PathBuf, durable_writes: bool, precreate_dirs: bool) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            durable_writes,
            precreate_dirs,
        }
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), ImageStoreError> {
        fs::create_dir_all(self.path_builder.temp_dir()).await?;

        let images_root = self.path_builder.images_dir();
        fs::create_dir_all(&images_root).await?;

        // One-time cost at startup instead of a create_dir_all per write
        if self.precreate_dirs {
            for i in 0..=255u8 {
                fs::create_dir_all(images_root.join(format!("{:02x}", i))).await?;
            }
        }

        Ok(())
    }

    pub fn path_of(&self, id: &ImageId) -> PathBuf {
        self.path_builder.image_path(id)
    }

    async fn write_temp(&self, path: &Path, data: &[u8]) -> Result<(), ImageStoreError> {
        let mut file = File::create(path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        if self.durable_writes {
            file.sync_all().await?;
        }
        Ok(())
    }

    async fn sync_parent(&self, path: &Path) {
        let Some(parent) = path.parent() else {
            return;
        };
        match File::open(parent).await {
            Ok(dir) => {
                if let Err(e) = dir.sync_all().await {
                    // File is already renamed; log but don't fail
                    warn!("Failed to sync parent directory after rename: {}", e);
                }
            }
            Err(e) => warn!("Failed to open parent directory for sync: {}", e),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, id: &ImageId, data: Bytes) -> Result<(), ImageStoreError> {
        // 1. Write to temp file
        let temp_path = self.path_builder.temp_path(Uuid::new_v4());
        debug!(image_id = %id, size = data.len(), "writing image to temp file");

        if let Err(e) = self.write_temp(&temp_path, &data).await {
            warn!("Failed to write image to temp file {:?}: {}", temp_path, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        // 2. Move into place (atomic on the same filesystem)
        let final_path = self.path_builder.image_path(id);
        if let Some(parent) = final_path.parent() {
            if !self.precreate_dirs {
                if let Err(e) = fs::create_dir_all(parent).await {
                    let _ = fs::remove_file(&temp_path).await;
                    return Err(ImageStoreError::Io(e));
                }
            }
        }

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(ImageStoreError::Io(e));
        }

        if self.durable_writes {
            self.sync_parent(&final_path).await;
        }

        Ok(())
    }

    async fn read(&self, id: &ImageId) -> Result<Bytes, ImageStoreError> {
        let path = self.path_builder.image_path(id);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImageStoreError::NotFound(id.to_string())
            } else {
                ImageStoreError::Io(e)
            }
        })?;

        Ok(Bytes::from(data))
    }

    async fn delete(&self, id: &ImageId) -> Result<(), ImageStoreError> {
        let path = self.path_builder.image_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(image_id = %id, "image already absent");
                Ok(())
            }
            Err(e) => Err(ImageStoreError::Io(e)),
        }
    }

    async fn exists(&self, id: &ImageId) -> Result<bool, ImageStoreError> {
        let path = self.path_builder.image_path(id);
        Ok(fs::try_exists(&path).await?)
    }
}
