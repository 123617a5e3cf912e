use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::{Advert, Image};
use crate::domain::value_objects::{AdvertId, ImageId, UserId};

/// Input for creating an advert; the image payloads move into the use case
#[derive(Debug, Clone)]
pub struct CreateAdvertRequest {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<Bytes>,
}

/// DTO for advert responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdvertDto {
    pub id: AdvertId,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_ids: Vec<ImageId>,
}

impl From<Advert> for AdvertDto {
    fn from(advert: Advert) -> Self {
        Self {
            id: *advert.id(),
            title: advert.title().to_string(),
            description: advert.description().to_string(),
            price: advert.price(),
            owner_id: *advert.owner_id(),
            created_at: advert.created_at(),
            updated_at: advert.updated_at(),
            image_ids: advert.image_ids(),
        }
    }
}

/// DTO for image metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageDto {
    pub id: ImageId,
    pub advert_id: AdvertId,
    pub created_at: DateTime<Utc>,
}

impl From<&Image> for ImageDto {
    fn from(image: &Image) -> Self {
        Self {
            id: *image.id(),
            advert_id: *image.advert_id(),
            created_at: image.created_at(),
        }
    }
}

/// Outcome of a committed advert deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAdvertReport {
    /// Images soft-deleted together with the advert
    pub image_ids: Vec<ImageId>,
    /// Images whose bytes could not be removed from the store
    pub leaked_image_ids: Vec<ImageId>,
}

/// Credentials supplied at sign-up and sign-in.
///
/// Carries a plaintext password, so it must not implement `Debug`.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Response for a created advert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdvertCreatedResponse {
    pub id: AdvertId,
}

/// Response for a registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponse {
    pub id: UserId,
}

/// Bearer token issued at sign-in
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
