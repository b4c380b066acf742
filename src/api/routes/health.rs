//! Liveness endpoint.

use axum::{Router, response::Json, routing::get};
use serde_json::{Value, json};

use super::app_state::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Service liveness
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = Object)
    )
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "parking-management-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
