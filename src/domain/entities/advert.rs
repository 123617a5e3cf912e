use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::Image;
use crate::domain::validation::ValidatedAdvert;
use crate::domain::value_objects::{AdvertId, ImageId, UserId};

/// Advert aggregate root: the advert row plus its ordered images
#[derive(Debug, Clone, PartialEq)]
pub struct Advert {
    id: AdvertId,
    title: String,
    description: String,
    price: Decimal,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted: bool,
    images: Vec<Image>,
}

impl Advert {
    /// Create a new, not yet persisted advert from validated fields
    pub fn new(id: AdvertId, fields: ValidatedAdvert, owner_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            price: fields.price,
            owner_id,
            created_at: now,
            updated_at: now,
            deleted: false,
            images: Vec::new(),
        }
    }

    /// Reconstruct from storage (e.g., database)
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: AdvertId,
        title: String,
        description: String,
        price: Decimal,
        owner_id: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted: bool,
        images: Vec<Image>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            owner_id,
            created_at,
            updated_at,
            deleted,
            images,
        }
    }

    /// Append an image; its position is its index in the advert
    pub fn attach_image(&mut self, id: ImageId, payload: Bytes) {
        let position = self.images.len() as i16;
        self.images
            .push(Image::new(id, self.id, position, payload, self.created_at));
    }

    pub fn discard_payloads(&mut self) {
        for image in &mut self.images {
            image.discard_payload();
        }
    }

    // Getters
    pub fn id(&self) -> &AdvertId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image_ids(&self) -> Vec<ImageId> {
        self.images.iter().map(|image| *image.id()).collect()
    }
}
