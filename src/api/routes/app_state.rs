//! Application state management.
//!
//! Defines the AppState struct that holds all shared application state:
//! configuration, the storage backend, the services built on it, the JWT
//! service and the optional database pool.

use crate::config::AppConfig;
use crate::middleware::rate_limit::{RateLimiterState, create_rate_limiter};
use crate::services::{
    BillingPolicy, CarEntryService, JwtService, ParkingService, SharedJwtService, VehicleService,
};
use crate::storage::{MemoryStorageBackend, PostgresStorageBackend, StorageBackend, StorageError};
use axum::extract::FromRef;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Storage backend (PostgreSQL when DATABASE_URL is set, otherwise in-memory)
    pub storage: Arc<dyn StorageBackend>,
    pub jwt_service: SharedJwtService,
    pub car_entry_service: CarEntryService,
    pub vehicle_service: VehicleService,
    pub parking_service: ParkingService,
    /// PostgreSQL database connection pool (optional)
    pub database: Option<PgPool>,
    /// Process-wide request quota; `None` when disabled
    pub rate_limiter: Option<RateLimiterState>,
}

impl AppState {
    /// Create application state backed by in-memory storage.
    pub fn new(config: AppConfig) -> Self {
        Self::with_storage(config, Arc::new(MemoryStorageBackend::new()))
    }

    /// Create application state over the given storage backend.
    pub fn with_storage(config: AppConfig, storage: Arc<dyn StorageBackend>) -> Self {
        let billing = BillingPolicy::new(config.billing_increment_minutes);
        Self {
            jwt_service: Arc::new(JwtService::new(&config.jwt_secret)),
            car_entry_service: CarEntryService::new(storage.clone(), billing),
            vehicle_service: VehicleService::new(storage.clone()),
            parking_service: ParkingService::new(storage.clone()),
            rate_limiter: create_rate_limiter(config.rate_limit_per_minute),
            config: Arc::new(config),
            storage,
            database: None,
        }
    }

    /// Initialize storage backend from configuration.
    ///
    /// Connects to PostgreSQL and runs migrations if a database URL is
    /// configured, otherwise keeps the in-memory backend.
    pub async fn init_storage(&mut self) -> Result<(), StorageError> {
        let Some(database_url) = self.config.database_url.clone() else {
            info!("DATABASE_URL not set, using in-memory storage");
            return Ok(());
        };

        let pool = PgPoolOptions::new()
            .max_connections(self.config.database_max_connections)
            .connect(&database_url)
            .await
            .map_err(|e| {
                StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))?;

        info!("Connected to PostgreSQL and applied migrations");
        let mut state = Self::with_storage(
            self.config.as_ref().clone(),
            Arc::new(PostgresStorageBackend::new(pool.clone())),
        );
        state.database = Some(pool);
        *self = state;
        Ok(())
    }

    /// Check if PostgreSQL storage is enabled
    pub fn is_postgres(&self) -> bool {
        self.database.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::development())
    }
}

impl FromRef<AppState> for SharedJwtService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.jwt_service.clone()
    }
}
