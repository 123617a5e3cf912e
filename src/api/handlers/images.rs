use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::application::use_cases::GetImageUseCase;
use crate::application::validation::parse_id;
use crate::domain::value_objects::ImageId;

/// GET /api/v1/images/{id}
/// Raw bytes of a live image
#[utoipa::path(
    get,
    path = "/api/v1/images/{id}",
    tag = "images",
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "Image bytes", body = Vec<u8>, content_type = "image/jpeg"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Image not found or deleted", body = ErrorResponse)
    )
)]
pub async fn get_image_handler(
    State(use_case): State<Arc<GetImageUseCase>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    const ACTION: &str = "error getting image";
    let image_id: ImageId = parse_id(&id).map_err(|e| ApiError::from(e).during(ACTION))?;

    let (_, data) = use_case
        .execute(&image_id)
        .await
        .map_err(|e| ApiError::from(e).during(ACTION))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| ApiError::internal_error("Failed to build response", &e))
}
