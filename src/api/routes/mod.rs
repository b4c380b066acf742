//! API routes module - organizes all route handlers.
//!
//! Resources are mounted per router; the binary nests the result under /api/v1.

pub mod app_state;
pub mod auth;
pub mod auth_context;
pub mod car_entries;
pub mod error;
pub mod health;
pub mod openapi;
pub mod parking;
pub mod response;
pub mod vehicles;

use crate::config::AppConfig;
use crate::middleware::rate_limit::rate_limit_middleware;
use axum::Router;

pub use app_state::AppState;

/// Create the main API router combining all route modules
///
/// State is applied by callers (`.with_state(app_state)`), as the binary and
/// the test servers do.
pub fn create_api_router(app_state: AppState) -> Router<AppState> {
    let router = Router::new()
        .nest("/car-entry", car_entries::car_entry_router())
        .nest("/vehicle", vehicles::vehicle_router())
        .nest("/parking", parking::parking_router())
        .nest("/auth", auth::auth_router())
        .merge(health::health_router())
        .merge(openapi::openapi_router());

    match app_state.rate_limiter {
        Some(limiter) => router.layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        )),
        None => router,
    }
}

/// Create an application state with development defaults and in-memory storage.
pub fn create_app_state() -> AppState {
    AppState::new(AppConfig::development())
}

/// Create the application state with storage initialization (async).
///
/// This is the method the binary uses.
pub async fn create_app_state_with_storage(
    config: AppConfig,
) -> Result<AppState, crate::storage::StorageError> {
    let mut state = AppState::new(config);
    state.init_storage().await?;
    Ok(state)
}
