use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::application::errors::{AdvertError, AuthError};
use crate::domain::errors::DomainError;

/// Error body: `message` says what the request tried, `error` what went wrong
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    pub error: String,
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    field: Option<String>,
    message: String,
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status,
            field: None,
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn bad_request(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, error)
    }

    pub fn invalid_field(field: &str, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::bad_request(message, error).with_field(field)
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", error)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "not found")
    }

    /// Internal details are logged, never returned
    pub fn internal_error(message: impl Into<String>, cause: &dyn std::fmt::Display) -> Self {
        let message = message.into();
        error!(error = %cause, "{}", message);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Replace the generic message with the action that failed
    pub fn during(mut self, action: &str) -> Self {
        self.message = action.to_string();
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            field: self.field,
            message: self.message,
            error: self.error,
        });

        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::invalid_field(err.field(), "invalid input", err.reason())
    }
}

// Convert use case errors to API errors

impl From<AdvertError> for ApiError {
    fn from(err: AdvertError) -> Self {
        match err {
            AdvertError::Validation(e) => e.into(),
            AdvertError::NotFound(msg) => ApiError::not_found(msg),
            AdvertError::Repository(e) => ApiError::internal_error("storage failure", &e),
            AdvertError::ImageStore(e) => ApiError::internal_error("image storage failure", &e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => e.into(),
            AuthError::InvalidCredentials => {
                ApiError::unauthorized(AuthError::InvalidCredentials.to_string())
            }
            AuthError::EmailTaken => ApiError::new(
                StatusCode::CONFLICT,
                "sign-up failed",
                AuthError::EmailTaken.to_string(),
            )
            .with_field("email"),
            AuthError::Repository(e) => ApiError::internal_error("storage failure", &e),
            AuthError::Credential(e) => ApiError::internal_error("credential failure", &e),
        }
    }
}
