use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::TableNames;
use crate::application::ports::{AdvertRepository, RepositoryError};
use crate::domain::entities::{Advert, Image};
use crate::domain::value_objects::{AdvertId, ImageId, UserId};

pub struct PostgresAdvertRepository {
    pool: PgPool,
    tables: TableNames,
}

impl PostgresAdvertRepository {
    pub fn new(pool: PgPool, tables: TableNames) -> Self {
        Self { pool, tables }
    }
}

#[async_trait]
impl AdvertRepository for PostgresAdvertRepository {
    async fn create_advert(&self, advert: &Advert) -> Result<AdvertId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(&format!(
            r#"
            INSERT INTO {adverts} (
                id, title, description, price, user_id,
                created_at, updated_at, deleted
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
            adverts = self.tables.adverts
        ))
        .bind(advert.id().as_uuid())
        .bind(advert.title())
        .bind(advert.description())
        .bind(advert.price())
        .bind(advert.owner_id().as_uuid())
        .bind(advert.created_at())
        .bind(advert.updated_at())
        .bind(advert.is_deleted())
        .execute(&mut *tx)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(RepositoryError::NotCreated(format!("advert {}", advert.id())));
        }

        let insert_image = format!(
            r#"
            INSERT INTO {images} (id, advert_id, position, created_at, deleted)
            VALUES ($1, $2, $3, $4, $5)
            "#,
            images = self.tables.images
        );

        for image in advert.images() {
            let inserted = sqlx::query(&insert_image)
                .bind(image.id().as_uuid())
                .bind(image.advert_id().as_uuid())
                .bind(image.position())
                .bind(image.created_at())
                .bind(image.is_deleted())
                .execute(&mut *tx)
                .await?;

            if inserted.rows_affected() == 0 {
                // Dropping `tx` rolls back the advert row
                return Err(RepositoryError::NotCreated(format!("image {}", image.id())));
            }
        }

        tx.commit().await?;

        Ok(*advert.id())
    }

    async fn delete_advert(
        &self,
        id: &AdvertId,
        owner_id: &UserId,
    ) -> Result<Vec<ImageId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(&format!(
            r#"
            UPDATE {adverts}
            SET deleted = true, updated_at = now()
            WHERE id = $1 AND user_id = $2 AND deleted = false
            "#,
            adverts = self.tables.adverts
        ))
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            debug!(advert_id = %id, "no live advert for owner");
            return Err(RepositoryError::NotFound(format!("advert {id}")));
        }

        let image_ids: Vec<Uuid> = sqlx::query_scalar(&format!(
            r#"
            UPDATE {images}
            SET deleted = true
            WHERE advert_id = $1 AND deleted = false
            RETURNING id
            "#,
            images = self.tables.images
        ))
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(image_ids.into_iter().map(ImageId::from_uuid).collect())
    }

    async fn get_advert_by_id(&self, id: &AdvertId) -> Result<Advert, RepositoryError> {
        // Inner join: an advert whose images are all deleted reads as missing
        let row = sqlx::query_as::<_, AdvertRow>(&format!(
            r#"
            SELECT a.id, a.title, a.description, a.price, a.user_id,
                   a.created_at, a.updated_at, a.deleted,
                   ARRAY_AGG(i.id ORDER BY i.position) AS image_ids,
                   ARRAY_AGG(i.position ORDER BY i.position) AS image_positions,
                   ARRAY_AGG(i.created_at ORDER BY i.position) AS image_created_at
            FROM {adverts} a
            JOIN {images} i ON i.advert_id = a.id AND i.deleted = false
            WHERE a.id = $1 AND a.deleted = false
            GROUP BY a.id
            "#,
            adverts = self.tables.adverts,
            images = self.tables.images
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => r.into_domain(),
            None => Err(RepositoryError::NotFound(format!("advert {id}"))),
        }
    }
}

// Internal row mapping struct
#[derive(sqlx::FromRow)]
struct AdvertRow {
    id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted: bool,
    image_ids: Vec<Uuid>,
    image_positions: Vec<i16>,
    image_created_at: Vec<DateTime<Utc>>,
}

impl AdvertRow {
    fn into_domain(self) -> Result<Advert, RepositoryError> {
        if self.image_ids.len() != self.image_positions.len()
            || self.image_ids.len() != self.image_created_at.len()
        {
            return Err(RepositoryError::Serialization(format!(
                "advert {}: image aggregates differ in length",
                self.id
            )));
        }

        let advert_id = AdvertId::from_uuid(self.id);
        let images = self
            .image_ids
            .into_iter()
            .zip(self.image_positions)
            .zip(self.image_created_at)
            .map(|((image_id, position), created_at)| {
                Image::reconstruct(
                    ImageId::from_uuid(image_id),
                    advert_id,
                    position,
                    created_at,
                    false,
                )
            })
            .collect();

        Ok(Advert::reconstruct(
            advert_id,
            self.title,
            self.description,
            self.price,
            UserId::from_uuid(self.user_id),
            self.created_at,
            self.updated_at,
            self.deleted,
            images,
        ))
    }
}
