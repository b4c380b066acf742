//! Vehicle routes. Each caller only ever sees and changes their own vehicles.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use serde_json::Value;
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::ApiError;
use super::response::{ApiJson, ApiPath, ApiResponse};
use crate::models::Vehicle;
use crate::services::{CreateVehicleRequest, UpdateVehicleRequest};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_vehicles).post(create_vehicle))
        .route("/{id}", put(update_vehicle).delete(delete_vehicle))
}

/// POST /vehicle - Register a vehicle for the caller
#[utoipa::path(
    post,
    path = "/vehicle",
    tag = "Vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle created", body = Vehicle),
        (status = 400, description = "Invalid input or duplicate plate"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(request): ApiJson<CreateVehicleRequest>,
) -> ApiResult<Vehicle> {
    let vehicle = state
        .vehicle_service
        .create_vehicle(&auth.user_context, request)
        .await?;
    Ok(ApiResponse::created("Vehicle created successfully", vehicle))
}

/// GET /vehicle - The caller's vehicles
#[utoipa::path(
    get,
    path = "/vehicle",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Vehicles owned by the caller", body = [Vehicle]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_vehicles(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Vec<Vehicle>> {
    let vehicles = state.vehicle_service.list_my_vehicles(&auth.user_context).await?;
    Ok(ApiResponse::ok("Vehicles retrieved successfully", vehicles))
}

/// PUT /vehicle/{id} - Change plate and/or type
#[utoipa::path(
    put,
    path = "/vehicle/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 400, description = "Invalid input or duplicate plate"),
        (status = 404, description = "Vehicle not found for this caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateVehicleRequest>,
) -> ApiResult<Vehicle> {
    let vehicle = state
        .vehicle_service
        .update_vehicle(&auth.user_context, id, request)
        .await?;
    Ok(ApiResponse::ok("Vehicle updated successfully", vehicle))
}

/// DELETE /vehicle/{id}
#[utoipa::path(
    delete,
    path = "/vehicle/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found for this caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Value> {
    state
        .vehicle_service
        .delete_vehicle(&auth.user_context, id)
        .await?;
    Ok(ApiResponse::ok("Vehicle deleted successfully", Value::Null))
}
