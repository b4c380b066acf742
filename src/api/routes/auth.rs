//! Token renewal.
//!
//! Tokens are issued by the identity provider in front of this API; the only
//! auth operation served here is exchanging a refresh token for a new pair.

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::post};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::app_state::AppState;
use super::error::ApiError;
use super::response::{ApiJson, ApiResponse};
use crate::services::{SharedJwtService, TokenPair};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

pub fn auth_router() -> Router<AppState> {
    Router::new().route("/refresh", post(refresh_token))
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Authentication",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenPair),
        (status = 401, description = "Refresh token invalid or expired")
    )
)]
pub async fn refresh_token(
    State(jwt_service): State<SharedJwtService>,
    ApiJson(request): ApiJson<RefreshTokenRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenPair>>), ApiError> {
    let pair = jwt_service
        .refresh_access_token(&request.refresh_token)
        .map_err(|e| {
            warn!("Token refresh rejected: {}", e);
            ApiError::unauthorized(e)
        })?;
    info!("Refreshed access token");
    Ok(ApiResponse::ok("Token refreshed", pair))
}
