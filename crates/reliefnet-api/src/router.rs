use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, put},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{health, requests};

pub fn router(state: AppState) -> Router {
    // Browser clients are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(false);

    Router::new()
        .route(
            "/api/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route(
            "/api/requests/{id}",
            put(requests::update_request).delete(requests::delete_request),
        )
        .route("/api/health", get(health::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
