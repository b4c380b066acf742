//! Parking lot routes.

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::ApiError;
use super::response::{ApiJson, ApiPath, ApiResponse};
use crate::models::ParkingLot;
use crate::services::CreateParkingLotRequest;

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn parking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_parking_lots).post(create_parking_lot))
        .route("/{id}", get(get_parking_lot))
}

/// POST /parking - Create a lot (Admin only)
#[utoipa::path(
    post,
    path = "/parking",
    tag = "Parking",
    request_body = CreateParkingLotRequest,
    responses(
        (status = 201, description = "Parking lot created", body = ParkingLot),
        (status = 400, description = "Invalid input or duplicate name"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_parking_lot(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(request): ApiJson<CreateParkingLotRequest>,
) -> ApiResult<ParkingLot> {
    let lot = state
        .parking_service
        .create_parking_lot(&auth.user_context, request)
        .await?;
    Ok(ApiResponse::created("Parking lot created successfully", lot))
}

/// GET /parking - All lots with their current availability
#[utoipa::path(
    get,
    path = "/parking",
    tag = "Parking",
    responses(
        (status = 200, description = "Parking lots", body = [ParkingLot]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_parking_lots(
    State(state): State<AppState>,
    _auth: AuthContext,
) -> ApiResult<Vec<ParkingLot>> {
    let lots = state.parking_service.list_parking_lots().await?;
    Ok(ApiResponse::ok("Parking lots retrieved successfully", lots))
}

/// GET /parking/{id}
#[utoipa::path(
    get,
    path = "/parking/{id}",
    tag = "Parking",
    params(("id" = Uuid, Path, description = "Parking lot ID")),
    responses(
        (status = 200, description = "Parking lot", body = ParkingLot),
        (status = 404, description = "Parking lot not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_parking_lot(
    State(state): State<AppState>,
    _auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ParkingLot> {
    let lot = state.parking_service.get_parking_lot(id).await?;
    Ok(ApiResponse::ok("Parking lot retrieved successfully", lot))
}
