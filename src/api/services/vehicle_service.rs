//! Owner-scoped vehicle registry.

use super::error::ParkingError;
use super::validation::PLATE_NUMBER_REGEX;
use crate::models::{Vehicle, VehicleType};
use crate::storage::{StorageBackend, UserContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(
        length(
            min = 3,
            max = 20,
            message = "Plate number must be between 3 and 20 characters"
        ),
        regex(
            path = *PLATE_NUMBER_REGEX,
            message = "Plate number must contain only uppercase letters, numbers, or hyphens"
        )
    )]
    pub plate_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    #[validate(
        length(
            min = 3,
            max = 20,
            message = "Plate number must be between 3 and 20 characters"
        ),
        regex(
            path = *PLATE_NUMBER_REGEX,
            message = "Plate number must contain only uppercase letters, numbers, or hyphens"
        )
    )]
    pub plate_number: Option<String>,
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<VehicleType>,
}

#[derive(Clone)]
pub struct VehicleService {
    storage: Arc<dyn StorageBackend>,
}

impl VehicleService {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create_vehicle(
        &self,
        user: &UserContext,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, ParkingError> {
        request.validate()?;

        if self
            .storage
            .get_vehicle_by_plate(&request.plate_number)
            .await?
            .is_some()
        {
            warn!("Duplicate vehicle plate {}", request.plate_number);
            return Err(ParkingError::Conflict(
                "Vehicle with this plate number already exists".to_string(),
            ));
        }

        let vehicle = self
            .storage
            .create_vehicle(Vehicle::new(
                request.plate_number,
                request.vehicle_type,
                user.user_id,
            ))
            .await?;
        info!("User {} registered vehicle {}", user.user_id, vehicle.plate_number);
        Ok(vehicle)
    }

    pub async fn list_my_vehicles(&self, user: &UserContext) -> Result<Vec<Vehicle>, ParkingError> {
        Ok(self.storage.list_vehicles_by_owner(user.user_id).await?)
    }

    pub async fn update_vehicle(
        &self,
        user: &UserContext,
        vehicle_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, ParkingError> {
        request.validate()?;
        let mut vehicle = self.owned_vehicle(user, vehicle_id).await?;

        if let Some(plate_number) = request.plate_number {
            vehicle.plate_number = plate_number;
        }
        if let Some(vehicle_type) = request.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }

        let vehicle = self.storage.update_vehicle(vehicle).await?;
        info!("User {} updated vehicle {}", user.user_id, vehicle.id);
        Ok(vehicle)
    }

    pub async fn delete_vehicle(&self, user: &UserContext, vehicle_id: Uuid) -> Result<(), ParkingError> {
        self.owned_vehicle(user, vehicle_id).await?;
        self.storage.delete_vehicle(vehicle_id).await?;
        info!("User {} deleted vehicle {}", user.user_id, vehicle_id);
        Ok(())
    }

    /// Missing and foreign-owned vehicles are indistinguishable to the caller.
    async fn owned_vehicle(&self, user: &UserContext, vehicle_id: Uuid) -> Result<Vehicle, ParkingError> {
        match self.storage.get_vehicle(vehicle_id).await? {
            Some(vehicle) if vehicle.is_owned_by(user.user_id) => Ok(vehicle),
            _ => Err(ParkingError::not_found("Vehicle", vehicle_id)),
        }
    }
}
