use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::api::middleware::AuthenticatedUser;
use crate::application::dto::{AdvertCreatedResponse, AdvertDto, CreateAdvertRequest};
use crate::application::use_cases::{CreateAdvertUseCase, DeleteAdvertUseCase, GetAdvertUseCase};
use crate::application::validation::parse_id;
use crate::domain::value_objects::{AdvertId, ImageId, UserId};

/// Builds public links to image bytes
#[derive(Debug, Clone)]
pub struct ImageLinks {
    base_url: Arc<str>,
}

impl ImageLinks {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            base_url: Arc::from(public_base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self, id: &ImageId) -> String {
        format!("{}/api/v1/images/{}", self.base_url, id)
    }
}

/// Advert as served to clients; images are referenced by URL
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvertResponse {
    pub id: AdvertId,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_urls: Vec<String>,
}

impl AdvertResponse {
    fn new(advert: AdvertDto, links: &ImageLinks) -> Self {
        Self {
            image_urls: advert.image_ids.iter().map(|id| links.url(id)).collect(),
            id: advert.id,
            title: advert.title,
            description: advert.description,
            price: advert.price,
            user_id: advert.owner_id,
            created_at: advert.created_at,
            updated_at: advert.updated_at,
        }
    }
}

/// Multipart form for advert creation, documentation only
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateAdvertForm {
    title: String,
    description: String,
    #[schema(example = "123.45")]
    price: String,
    /// One to seven JPEG or PNG files
    #[schema(value_type = Vec<String>, format = Binary)]
    images: Vec<Vec<u8>>,
}

const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Accepts only payloads that start like a JPEG or PNG file
fn is_supported_image(data: &[u8]) -> bool {
    data.starts_with(JPEG_SIGNATURE) || data.starts_with(PNG_SIGNATURE)
}

fn multipart_error(e: MultipartError, action: &str) -> ApiError {
    ApiError::new(e.status(), action, e.body_text())
}

/// Collect the advert form. Unknown fields are ignored; a missing field reads as empty.
async fn read_advert_form(
    mut multipart: Multipart,
    action: &str,
) -> Result<CreateAdvertRequest, ApiError> {
    let mut title = String::new();
    let mut description = String::new();
    let mut price = String::new();
    let mut images: Vec<Bytes> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, action))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = field.text().await.map_err(|e| multipart_error(e, action))?,
            "description" => {
                description = field.text().await.map_err(|e| multipart_error(e, action))?
            }
            "price" => price = field.text().await.map_err(|e| multipart_error(e, action))?,
            "images" => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let data = field.bytes().await.map_err(|e| multipart_error(e, action))?;
                if !is_supported_image(&data) {
                    return Err(ApiError::invalid_field(
                        "images",
                        format!("image cannot be decoded: {file_name}"),
                        "unsupported image format",
                    ));
                }
                images.push(data);
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }

    let price = Decimal::from_str(price.trim()).map_err(|e| {
        ApiError::invalid_field("price", "must be a number e.g. 123.45", e.to_string())
    })?;

    Ok(CreateAdvertRequest {
        title,
        description,
        price,
        images,
    })
}

/// POST /api/v1/adverts
#[utoipa::path(
    post,
    path = "/api/v1/adverts",
    tag = "adverts",
    request_body(content = CreateAdvertForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Advert created", body = AdvertCreatedResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_advert_handler(
    State(use_case): State<Arc<CreateAdvertUseCase>>,
    Extension(AuthenticatedUser(owner_id)): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AdvertCreatedResponse>), ApiError> {
    const ACTION: &str = "error creating advert";
    let request = read_advert_form(multipart, ACTION).await?;

    let id = use_case
        .execute(request, &owner_id)
        .await
        .map_err(|e| ApiError::from(e).during(ACTION))?;

    Ok((StatusCode::CREATED, Json(AdvertCreatedResponse { id })))
}

/// DELETE /api/v1/adverts/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/adverts/{id}",
    tag = "adverts",
    params(("id" = String, Path, description = "Advert id")),
    responses(
        (status = 204, description = "Advert deleted"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Advert not found or not owned by caller", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_advert_handler(
    State(use_case): State<Arc<DeleteAdvertUseCase>>,
    Extension(AuthenticatedUser(owner_id)): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    const ACTION: &str = "error deleting advert";
    let advert_id: AdvertId = parse_id(&id).map_err(|e| ApiError::from(e).during(ACTION))?;

    use_case
        .execute(&advert_id, &owner_id)
        .await
        .map_err(|e| ApiError::from(e).during(ACTION))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/adverts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/adverts/{id}",
    tag = "adverts",
    params(("id" = String, Path, description = "Advert id")),
    responses(
        (status = 200, description = "Advert with image links", body = AdvertResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Advert not found", body = ErrorResponse)
    )
)]
pub async fn get_advert_handler(
    State((use_case, links)): State<(Arc<GetAdvertUseCase>, ImageLinks)>,
    Path(id): Path<String>,
) -> Result<Json<AdvertResponse>, ApiError> {
    const ACTION: &str = "error getting advert by id";
    let advert_id: AdvertId = parse_id(&id).map_err(|e| ApiError::from(e).during(ACTION))?;

    let advert = use_case
        .execute(&advert_id)
        .await
        .map_err(|e| ApiError::from(e).during(ACTION))?;

    Ok(Json(AdvertResponse::new(advert, &links)))
}
