use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;
use utoipa::ToSchema;

const SERVICE: &str = "advertisement";
const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Result of the readiness check
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub database: DatabaseStatus,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
    Timeout,
}

impl ReadinessResponse {
    fn new(database: DatabaseStatus, error: Option<&'static str>, elapsed: Duration) -> Self {
        Self {
            status: if database == DatabaseStatus::Connected {
                "ready"
            } else {
                "not_ready"
            },
            service: SERVICE,
            database,
            response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            error,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.database {
            DatabaseStatus::Connected => StatusCode::OK,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// GET /health
/// Liveness only; does not touch the database
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/ready
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ReadinessResponse),
        (status = 503, description = "Database unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Arc<PgPool>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let started = Instant::now();
    let ping = tokio::time::timeout(
        DB_PING_TIMEOUT,
        sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool.as_ref()),
    )
    .await;

    let response = match ping {
        Ok(Ok(_)) => ReadinessResponse::new(DatabaseStatus::Connected, None, started.elapsed()),
        Ok(Err(e)) => {
            warn!(error = %e, "Readiness check failed");
            ReadinessResponse::new(
                DatabaseStatus::Disconnected,
                Some(sanitize_db_error(&e)),
                started.elapsed(),
            )
        }
        Err(_) => {
            warn!(timeout_ms = DB_PING_TIMEOUT.as_millis() as u64, "Readiness check timed out");
            ReadinessResponse::new(
                DatabaseStatus::Timeout,
                Some("database did not answer in time"),
                started.elapsed(),
            )
        }
    };

    (response.status_code(), Json(response))
}

/// Maps a driver error to a message that carries no connection details.
fn sanitize_db_error(error: &sqlx::Error) -> &'static str {
    match error {
        sqlx::Error::Configuration(_) => "database configuration error",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "database connection error",
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => "database pool unavailable",
        _ => "database error",
    }
}
