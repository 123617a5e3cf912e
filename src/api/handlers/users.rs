use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::application::dto::{CredentialsRequest, SignUpResponse, TokenResponse};
use crate::application::use_cases::{SignInUseCase, SignUpUseCase};

fn credentials(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
    action: &str,
) -> Result<CredentialsRequest, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::new(e.status(), action, e.body_text()))
}

/// POST /api/v1/users/sign-up
#[utoipa::path(
    post,
    path = "/api/v1/users/sign-up",
    tag = "users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered", body = SignUpResponse),
        (status = 400, description = "Invalid email or password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn sign_up_handler(
    State(use_case): State<Arc<SignUpUseCase>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    const ACTION: &str = "error signing up";
    let request = credentials(payload, ACTION)?;

    let id = use_case
        .execute(&request.email, &request.password)
        .await
        .map_err(|e| ApiError::from(e).during(ACTION))?;

    Ok((StatusCode::CREATED, Json(SignUpResponse { id })))
}

/// POST /api/v1/users/sign-in
#[utoipa::path(
    post,
    path = "/api/v1/users/sign-in",
    tag = "users",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    )
)]
pub async fn sign_in_handler(
    State(use_case): State<Arc<SignInUseCase>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    const ACTION: &str = "error signing in";
    let request = credentials(payload, ACTION)?;

    let token = use_case
        .execute(&request.email, &request.password)
        .await
        .map_err(|e| ApiError::from(e).during(ACTION))?;

    Ok(Json(TokenResponse { token }))
}
