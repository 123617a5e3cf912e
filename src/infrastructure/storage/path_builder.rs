use std::path::PathBuf;

use crate::domain::value_objects::ImageId;

/// Utility for generating image file paths
#[derive(Debug, Clone)]
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory holding in-flight writes: /root/temp
    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("temp")
    }

    /// Generate temp write path: /root/temp/{uuid}
    pub fn temp_path(&self, write_id: uuid::Uuid) -> PathBuf {
        self.temp_dir().join(write_id.to_string())
    }

    /// Directory holding all image files: /root/images
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Generate final image path: /root/images/{prefix}/{id}.jpg
    ///
    /// The prefix is the first two hex digits of the id, so files spread
    /// over at most 256 directories.
    pub fn image_path(&self, id: &ImageId) -> PathBuf {
        let name = id.as_uuid().simple().to_string();
        self.images_dir()
            .join(&name[..2])
            .join(format!("{}.jpg", id))
    }
}
