use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::TableNames;
use crate::application::ports::{ImageRepository, RepositoryError};
use crate::domain::entities::Image;
use crate::domain::value_objects::{AdvertId, ImageId};

pub struct PostgresImageRepository {
    pool: PgPool,
    tables: TableNames,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn get_image_by_id(&self, id: &ImageId) -> Result<Image, RepositoryError> {
        let row = sqlx::query_as::<_, ImageRow>(&format!(
            r#"
            SELECT id, advert_id, position, created_at, deleted
            FROM {images}
            WHERE id = $1
            "#,
            images = self.tables.images
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ImageRow::into_domain)
            .ok_or_else(|| RepositoryError::NotFound(format!("image {id}")))
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    advert_id: Uuid,
    position: i16,
    created_at: DateTime<Utc>,
    deleted: bool,
}

impl ImageRow {
    fn into_domain(self) -> Image {
        Image::reconstruct(
            ImageId::from_uuid(self.id),
            AdvertId::from_uuid(self.advert_id),
            self.position,
            self.created_at,
            self.deleted,
        )
    }
}
