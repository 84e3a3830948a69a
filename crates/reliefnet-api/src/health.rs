use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use reliefnet_types::api::HealthResponse;

use crate::state::AppState;

/// GET /api/health: always answers, even when the database cannot be reached.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.run_db(|db| db.health_check()).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            warn!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::unhealthy(e.to_string())),
            )
        }
    }
}
