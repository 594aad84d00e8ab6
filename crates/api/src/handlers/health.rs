use crate::dto::HealthResponse;
use axum::Json;
use tracing::debug;

pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse { status: "ok" })
}
