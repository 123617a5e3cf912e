use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::iter::once;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer,
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::api::handlers::{
    create_advert_handler, delete_advert_handler, get_advert_handler, get_image_handler,
    health_handler, readiness_handler, sign_in_handler, sign_up_handler, ImageLinks,
};
use crate::api::middleware::{auth_middleware, create_cors_layer, request_logging_middleware};
use crate::api::openapi::swagger_ui;
use crate::application::ports::TokenService;
use crate::application::use_cases::{
    CreateAdvertUseCase, DeleteAdvertUseCase, GetAdvertUseCase, GetImageUseCase, SignInUseCase,
    SignUpUseCase,
};

/// Application state container
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub create_advert_use_case: Arc<CreateAdvertUseCase>,
    pub delete_advert_use_case: Arc<DeleteAdvertUseCase>,
    pub get_advert_use_case: Arc<GetAdvertUseCase>,
    pub get_image_use_case: Arc<GetImageUseCase>,
    pub sign_up_use_case: Arc<SignUpUseCase>,
    pub sign_in_use_case: Arc<SignInUseCase>,
    pub tokens: Arc<dyn TokenService>,
    pub image_links: ImageLinks,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Routes acting on behalf of a signed-in user
    let protected = Router::new()
        .route(
            "/api/v1/adverts",
            post(create_advert_handler).with_state(Arc::clone(&state.create_advert_use_case)),
        )
        .route(
            "/api/v1/adverts/{id}",
            axum::routing::delete(delete_advert_handler)
                .with_state(Arc::clone(&state.delete_advert_use_case)),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state.tokens),
            auth_middleware,
        ))
        // Multipart uploads: the default 2 MiB extractor limit is replaced by ours
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.max_upload_bytes));

    let public = Router::new()
        // Health check (no auth required)
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(Arc::clone(&state.pool)),
        )
        .route(
            "/api/v1/users/sign-up",
            post(sign_up_handler).with_state(Arc::clone(&state.sign_up_use_case)),
        )
        .route(
            "/api/v1/users/sign-in",
            post(sign_in_handler).with_state(Arc::clone(&state.sign_in_use_case)),
        )
        .route(
            "/api/v1/adverts/{id}",
            get(get_advert_handler).with_state((
                Arc::clone(&state.get_advert_use_case),
                state.image_links.clone(),
            )),
        )
        .route(
            "/api/v1/images/{id}",
            get(get_image_handler).with_state(Arc::clone(&state.get_image_use_case)),
        );

    Router::new()
        .merge(protected)
        .merge(public)
        .merge(swagger_ui())
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(&state.allowed_origins))
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            axum::http::header::AUTHORIZATION,
        )))
        .layer(axum_middleware::from_fn(request_logging_middleware))
}
