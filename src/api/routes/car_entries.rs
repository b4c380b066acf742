//! Car-entry routes: registration, exit, listing, tickets and bills.
//!
//! Every route requires a lot-managing role (Admin or Parking Attendant).

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use uuid::Uuid;

use super::app_state::AppState;
use super::auth_context::AuthContext;
use super::error::ApiError;
use super::response::{ApiJson, ApiPath, ApiResponse};
use crate::models::{Bill, CarEntryView, Ticket};
use crate::services::{CreateCarEntryRequest, RecordExitRequest, RegisteredEntry, SettledEntry};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn car_entry_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_car_entries).post(create_car_entry))
        .route("/{id}/exit", put(record_car_exit))
        .route("/{id}/ticket", get(get_ticket))
        .route("/{id}/bill", get(get_bill))
}

/// POST /car-entry - Register a car entering a lot
#[utoipa::path(
    post,
    path = "/car-entry",
    tag = "Car Entries",
    request_body = CreateCarEntryRequest,
    responses(
        (status = 201, description = "Entry registered; data holds the entry and its ticket", body = RegisteredEntry),
        (status = 400, description = "Invalid input or lot full"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Role cannot manage lots"),
        (status = 404, description = "Parking lot not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_car_entry(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiJson(request): ApiJson<CreateCarEntryRequest>,
) -> ApiResult<RegisteredEntry> {
    let registered = state
        .car_entry_service
        .register_entry(&auth.user_context, request)
        .await?;
    Ok(ApiResponse::created("Car entry registered successfully", registered))
}

/// GET /car-entry - List all entries, newest first
#[utoipa::path(
    get,
    path = "/car-entry",
    tag = "Car Entries",
    responses(
        (status = 200, description = "Entries with lot names and display fields", body = [CarEntryView]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Role cannot manage lots")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_car_entries(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Vec<CarEntryView>> {
    let entries = state.car_entry_service.list_entries(&auth.user_context).await?;
    Ok(ApiResponse::ok("Car entries retrieved successfully", entries))
}

/// PUT /car-entry/{id}/exit - Record a car leaving
///
/// The body is optional; an empty body records the exit at the current time.
#[utoipa::path(
    put,
    path = "/car-entry/{id}/exit",
    tag = "Car Entries",
    params(("id" = Uuid, Path, description = "Car entry ID")),
    request_body(content = RecordExitRequest, description = "Optional exit time"),
    responses(
        (status = 200, description = "Exit recorded; data holds the entry and its bill", body = SettledEntry),
        (status = 400, description = "Invalid exit time or already exited"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Role cannot manage lots"),
        (status = 404, description = "Car entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn record_car_exit(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
    body: Bytes,
) -> ApiResult<SettledEntry> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        RecordExitRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?
    };

    let settled = state
        .car_entry_service
        .record_exit(&auth.user_context, id, request)
        .await?;
    Ok(ApiResponse::ok("Car exit recorded successfully", settled))
}

/// GET /car-entry/{id}/ticket - Ticket for an entry
#[utoipa::path(
    get,
    path = "/car-entry/{id}/ticket",
    tag = "Car Entries",
    params(("id" = Uuid, Path, description = "Car entry ID")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Car entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Ticket> {
    let ticket = state.car_entry_service.get_ticket(&auth.user_context, id).await?;
    Ok(ApiResponse::ok("Ticket retrieved successfully", ticket))
}

/// GET /car-entry/{id}/bill - Bill for a settled entry
#[utoipa::path(
    get,
    path = "/car-entry/{id}/bill",
    tag = "Car Entries",
    params(("id" = Uuid, Path, description = "Car entry ID")),
    responses(
        (status = 200, description = "Bill", body = Bill),
        (status = 400, description = "Car has not exited yet"),
        (status = 404, description = "Car entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_bill(
    State(state): State<AppState>,
    auth: AuthContext,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Bill> {
    let bill = state.car_entry_service.get_bill(&auth.user_context, id).await?;
    Ok(ApiResponse::ok("Bill retrieved successfully", bill))
}
