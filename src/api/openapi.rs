use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::errors::ErrorResponse;
use crate::api::handlers::adverts::CreateAdvertForm;
use crate::api::handlers::health::{DatabaseStatus, HealthResponse, ReadinessResponse};
use crate::api::handlers::AdvertResponse;
use crate::application::dto::{
    AdvertCreatedResponse, CredentialsRequest, SignUpResponse, TokenResponse,
};

/// Registers the bearer scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the advertisement API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Advertisement API",
        version = "1.0.0",
        description = "Classified adverts with image uploads"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::users::sign_up_handler,
        crate::api::handlers::users::sign_in_handler,
        crate::api::handlers::adverts::create_advert_handler,
        crate::api::handlers::adverts::delete_advert_handler,
        crate::api::handlers::adverts::get_advert_handler,
        crate::api::handlers::images::get_image_handler,
    ),
    components(
        schemas(
            AdvertResponse,
            AdvertCreatedResponse,
            CreateAdvertForm,
            CredentialsRequest,
            SignUpResponse,
            TokenResponse,
            ErrorResponse,
            HealthResponse,
            ReadinessResponse,
            DatabaseStatus,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Sign-up and sign-in"),
        (name = "adverts", description = "Advert lifecycle"),
        (name = "images", description = "Image bytes")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
