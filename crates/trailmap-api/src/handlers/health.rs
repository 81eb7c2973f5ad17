use axum::Json;

use crate::dto::HealthResponse;

/// Liveness only; does not touch the data or cache directories
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
