use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness probe, unauthenticated.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
