//! Storage trait definitions for the API storage backends.

use crate::models::{CarEntry, ParkingLot, Role, Vehicle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User context for storage operations
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Storage backend trait for database operations.
///
/// `register_car_entry` and `record_car_exit` are the two lifecycle primitives.
/// Each must apply the car entry write and the parking lot counter change as one
/// atomic unit: either both are visible afterwards or neither is.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Create a new parking lot
    async fn create_parking_lot(&self, lot: ParkingLot) -> Result<ParkingLot, super::StorageError>;

    /// Get parking lot by ID
    async fn get_parking_lot(&self, id: Uuid) -> Result<Option<ParkingLot>, super::StorageError>;

    /// List all parking lots ordered by name
    async fn list_parking_lots(&self) -> Result<Vec<ParkingLot>, super::StorageError>;

    /// Take one space in `entry.parking_id` and insert `entry`.
    ///
    /// Fails with `NotFound` when the lot does not exist and `CapacityExceeded`
    /// when it has no available space; nothing is written in either case.
    /// Returns the inserted entry and the lot as it stands after the decrement.
    async fn register_car_entry(
        &self,
        entry: CarEntry,
    ) -> Result<(CarEntry, ParkingLot), super::StorageError>;

    /// Set the exit time and charge of an active entry and release its space.
    ///
    /// Fails with `AlreadyExited` if the entry already has an exit time; the
    /// lot counter is left untouched in that case.
    async fn record_car_exit(
        &self,
        car_entry_id: Uuid,
        exit_date_time: DateTime<Utc>,
        charged_amount: f64,
    ) -> Result<(CarEntry, ParkingLot), super::StorageError>;

    /// Get car entry by ID
    async fn get_car_entry(&self, id: Uuid) -> Result<Option<CarEntry>, super::StorageError>;

    /// List all car entries, most recent entry first
    async fn list_car_entries(&self) -> Result<Vec<CarEntry>, super::StorageError>;

    /// Create a vehicle; `Conflict` if the plate number is taken
    async fn create_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, super::StorageError>;

    /// Get vehicle by ID
    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, super::StorageError>;

    /// Find a vehicle by plate number
    async fn get_vehicle_by_plate(
        &self,
        plate_number: &str,
    ) -> Result<Option<Vehicle>, super::StorageError>;

    /// List vehicles belonging to `owner_id`
    async fn list_vehicles_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Vehicle>, super::StorageError>;

    /// Replace plate number and type of an existing vehicle
    async fn update_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, super::StorageError>;

    /// Delete a vehicle
    async fn delete_vehicle(&self, id: Uuid) -> Result<(), super::StorageError>;
}
