//! In-memory storage backend implementation.
//!
//! Used when no DATABASE_URL is configured and by the test suites. A single
//! mutex guards every table, so each lifecycle primitive runs as one atomic unit.

use super::{StorageError, traits::*};
use crate::models::{CarEntry, ParkingLot, Vehicle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    parking_lots: HashMap<Uuid, ParkingLot>,
    car_entries: HashMap<Uuid, CarEntry>,
    vehicles: HashMap<Uuid, Vehicle>,
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorageBackend {
    tables: Mutex<Tables>,
}

impl MemoryStorageBackend {
    /// Create an empty in-memory storage backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorageBackend {
    async fn create_parking_lot(&self, lot: ParkingLot) -> Result<ParkingLot, StorageError> {
        let mut tables = self.tables.lock().await;
        if tables.parking_lots.values().any(|l| l.name == lot.name) {
            return Err(StorageError::Conflict(format!(
                "Parking lot named '{}' already exists",
                lot.name
            )));
        }
        tables.parking_lots.insert(lot.id, lot.clone());
        Ok(lot)
    }

    async fn get_parking_lot(&self, id: Uuid) -> Result<Option<ParkingLot>, StorageError> {
        Ok(self.tables.lock().await.parking_lots.get(&id).cloned())
    }

    async fn list_parking_lots(&self) -> Result<Vec<ParkingLot>, StorageError> {
        let tables = self.tables.lock().await;
        let mut lots: Vec<ParkingLot> = tables.parking_lots.values().cloned().collect();
        lots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lots)
    }

    async fn register_car_entry(
        &self,
        entry: CarEntry,
    ) -> Result<(CarEntry, ParkingLot), StorageError> {
        let mut tables = self.tables.lock().await;

        let lot = tables
            .parking_lots
            .get_mut(&entry.parking_id)
            .ok_or_else(|| StorageError::not_found("Parking lot", entry.parking_id))?;

        if lot.is_full() {
            return Err(StorageError::CapacityExceeded {
                parking_id: entry.parking_id,
            });
        }
        lot.available_spaces -= 1;
        lot.updated_at = Utc::now();
        let lot = lot.clone();

        tables.car_entries.insert(entry.id, entry.clone());
        Ok((entry, lot))
    }

    async fn record_car_exit(
        &self,
        car_entry_id: Uuid,
        exit_date_time: DateTime<Utc>,
        charged_amount: f64,
    ) -> Result<(CarEntry, ParkingLot), StorageError> {
        let mut tables = self.tables.lock().await;
        let Tables {
            parking_lots,
            car_entries,
            ..
        } = &mut *tables;

        let entry = car_entries
            .get_mut(&car_entry_id)
            .ok_or_else(|| StorageError::not_found("Car entry", car_entry_id))?;
        if entry.exit_date_time.is_some() {
            return Err(StorageError::AlreadyExited { car_entry_id });
        }

        let lot = parking_lots
            .get_mut(&entry.parking_id)
            .ok_or_else(|| StorageError::not_found("Parking lot", entry.parking_id))?;

        let now = Utc::now();
        entry.exit_date_time = Some(exit_date_time);
        entry.charged_amount = charged_amount;
        entry.updated_at = now;
        lot.available_spaces = (lot.available_spaces + 1).min(lot.total_spaces);
        lot.updated_at = now;

        Ok((entry.clone(), lot.clone()))
    }

    async fn get_car_entry(&self, id: Uuid) -> Result<Option<CarEntry>, StorageError> {
        Ok(self.tables.lock().await.car_entries.get(&id).cloned())
    }

    async fn list_car_entries(&self) -> Result<Vec<CarEntry>, StorageError> {
        let tables = self.tables.lock().await;
        let mut entries: Vec<CarEntry> = tables.car_entries.values().cloned().collect();
        entries.sort_by(|a, b| b.entry_date_time.cmp(&a.entry_date_time));
        Ok(entries)
    }

    async fn create_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        let mut tables = self.tables.lock().await;
        if tables
            .vehicles
            .values()
            .any(|v| v.plate_number == vehicle.plate_number)
        {
            return Err(StorageError::Conflict(format!(
                "Vehicle with plate number {} already exists",
                vehicle.plate_number
            )));
        }
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, StorageError> {
        Ok(self.tables.lock().await.vehicles.get(&id).cloned())
    }

    async fn get_vehicle_by_plate(
        &self,
        plate_number: &str,
    ) -> Result<Option<Vehicle>, StorageError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .vehicles
            .values()
            .find(|v| v.plate_number == plate_number)
            .cloned())
    }

    async fn list_vehicles_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, StorageError> {
        let tables = self.tables.lock().await;
        let mut vehicles: Vec<Vehicle> = tables
            .vehicles
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(vehicles)
    }

    async fn update_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        let mut tables = self.tables.lock().await;
        if tables
            .vehicles
            .values()
            .any(|v| v.id != vehicle.id && v.plate_number == vehicle.plate_number)
        {
            return Err(StorageError::Conflict(format!(
                "Vehicle with plate number {} already exists",
                vehicle.plate_number
            )));
        }
        match tables.vehicles.get_mut(&vehicle.id) {
            Some(existing) => {
                existing.plate_number = vehicle.plate_number;
                existing.vehicle_type = vehicle.vehicle_type;
                existing.updated_at = Utc::now();
                Ok(existing.clone())
            }
            None => Err(StorageError::not_found("Vehicle", vehicle.id)),
        }
    }

    async fn delete_vehicle(&self, id: Uuid) -> Result<(), StorageError> {
        match self.tables.lock().await.vehicles.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::not_found("Vehicle", id)),
        }
    }
}
