//! Service-level error taxonomy.

use crate::storage::StorageError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum ParkingError {
    /// Malformed input; the message lists every failing field
    #[error("{0}")]
    Validation(String),
    /// Caller's role lacks the capability
    #[error("{0}")]
    Forbidden(String),
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    #[error("No available spaces in the parking lot")]
    CapacityExceeded { parking_id: Uuid },
    #[error("Car has already exited")]
    AlreadyExited { car_entry_id: Uuid },
    #[error("Car has not exited yet")]
    NotExited { car_entry_id: Uuid },
    #[error("{0}")]
    Conflict(String),
    #[error("Storage failure: {0}")]
    Storage(StorageError),
}

impl ParkingError {
    pub fn not_found(entity_type: &str, entity_id: impl ToString) -> Self {
        ParkingError::NotFound {
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
        }
    }
}

impl From<StorageError> for ParkingError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound {
                entity_type,
                entity_id,
            } => ParkingError::NotFound {
                entity_type,
                entity_id,
            },
            StorageError::CapacityExceeded { parking_id } => {
                ParkingError::CapacityExceeded { parking_id }
            }
            StorageError::AlreadyExited { car_entry_id } => {
                ParkingError::AlreadyExited { car_entry_id }
            }
            StorageError::Conflict(message) => ParkingError::Conflict(message),
            other => ParkingError::Storage(other),
        }
    }
}

impl From<ValidationErrors> for ParkingError {
    fn from(errors: ValidationErrors) -> Self {
        ParkingError::Validation(validation_message(&errors))
    }
}

/// Join field messages into one line, ordered by field name.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
