//! Parking lot registry and capacity reads.

use super::error::ParkingError;
use crate::models::ParkingLot;
use crate::storage::{StorageBackend, UserContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request to create a parking lot
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateParkingLotRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,
    #[validate(range(min = 0, message = "Total spaces cannot be negative"))]
    pub total_spaces: i32,
    #[validate(range(min = 0.0, message = "Charging fee cannot be negative"))]
    pub charging_fee_per_hour: f64,
}

#[derive(Clone)]
pub struct ParkingService {
    storage: Arc<dyn StorageBackend>,
}

impl ParkingService {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Create a lot with every space available. Admin only.
    pub async fn create_parking_lot(
        &self,
        user: &UserContext,
        request: CreateParkingLotRequest,
    ) -> Result<ParkingLot, ParkingError> {
        if !user.role.is_admin() {
            warn!("User {} attempted to create a parking lot", user.user_id);
            return Err(ParkingError::Forbidden(
                "Only admins can create parking lots".to_string(),
            ));
        }
        request.validate()?;

        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ParkingError::Validation("Name must not be blank".to_string()));
        }

        let lot = self
            .storage
            .create_parking_lot(ParkingLot::new(
                name,
                request.location,
                request.total_spaces,
                request.charging_fee_per_hour,
            ))
            .await?;
        info!(
            "Created parking lot {} ({}) with {} spaces",
            lot.name, lot.id, lot.total_spaces
        );
        Ok(lot)
    }

    pub async fn list_parking_lots(&self) -> Result<Vec<ParkingLot>, ParkingError> {
        Ok(self.storage.list_parking_lots().await?)
    }

    pub async fn get_parking_lot(&self, id: Uuid) -> Result<ParkingLot, ParkingError> {
        self.storage
            .get_parking_lot(id)
            .await?
            .ok_or_else(|| ParkingError::not_found("Parking lot", id))
    }
}
