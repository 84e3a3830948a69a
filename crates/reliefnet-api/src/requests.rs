use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::{debug, info};

use reliefnet_types::api::{HelpRequestResponse, MessageResponse, UpdateResolutionRequest};
use reliefnet_types::models::NewHelpRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/requests: unresolved requests, newest first.
pub async fn list_requests(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let requests = state.run_db(|db| db.list_unresolved()).await?;

    let body: Vec<HelpRequestResponse> = requests.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// POST /api/requests: the body is taken as loose JSON so a missing field can
/// be reported by name before anything touches the database.
pub async fn create_request(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let req = NewHelpRequest::from_json(&body)?;
    let id = req.id.clone();

    state.run_db(move |db| db.create(&req)).await?;
    info!("Help request {} created", id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Request created successfully")),
    ))
}

/// PUT /api/requests/{id}: `{"is_resolved": bool}`. An empty body or a
/// missing flag marks the request resolved. Unknown ids are accepted.
pub async fn update_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let update = if body.iter().all(u8::is_ascii_whitespace) {
        UpdateResolutionRequest::default()
    } else {
        serde_json::from_slice::<UpdateResolutionRequest>(&body)
            .map_err(|e| ApiError::Body(e.to_string()))?
    };

    let id = request_id.clone();
    let updated = state
        .run_db(move |db| db.update_resolution(&id, update.is_resolved))
        .await?;
    if updated == 0 {
        debug!("Resolution update for unknown request {}", request_id);
    }

    Ok(Json(MessageResponse::new("Request updated successfully")))
}

/// DELETE /api/requests/{id}: permanent, succeeds whether or not the id exists.
pub async fn delete_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = request_id.clone();
    let deleted = state.run_db(move |db| db.delete(&id)).await?;
    if deleted == 0 {
        debug!("Delete for unknown request {}", request_id);
    } else {
        info!("Help request {} deleted", request_id);
    }

    Ok(Json(MessageResponse::new("Request deleted successfully")))
}
