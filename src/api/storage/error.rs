//! Storage error types for the API storage backends.

use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    /// Guarded decrement matched no row because the lot is full
    #[error("No available spaces in parking lot {parking_id}")]
    CapacityExceeded { parking_id: Uuid },
    /// Guarded exit update matched no row because the entry already has an exit time
    #[error("Car entry {car_entry_id} has already exited")]
    AlreadyExited { car_entry_id: Uuid },
    /// Unique constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Database connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl StorageError {
    pub fn not_found(entity_type: &str, entity_id: impl ToString) -> Self {
        StorageError::NotFound {
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
        }
    }
}
