//! PostgreSQL storage backend implementation.
//!
//! Uses sqlx for database operations and implements the StorageBackend trait.
//! Capacity is taken with a guarded conditional decrement and exits lock the
//! entry row, so concurrent requests cannot oversell a lot or settle an entry twice.

use super::{StorageError, traits::*};
use crate::models::{CarEntry, ParkingLot, Vehicle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const PARKING_LOT_COLUMNS: &str = "id, name, location, total_spaces, available_spaces, charging_fee_per_hour, created_at, updated_at";
const CAR_ENTRY_COLUMNS: &str = "id, plate_number, parking_id, entry_date_time, exit_date_time, charged_amount, created_at, updated_at";
const VEHICLE_COLUMNS: &str = "id, plate_number, vehicle_type, owner_id, created_at, updated_at";

/// Map a sqlx error, turning unique violations into `Conflict`.
fn map_write_error(e: sqlx::Error, conflict_message: impl FnOnce() -> String) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StorageError::Conflict(conflict_message())
        }
        _ => StorageError::ConnectionError(e.to_string()),
    }
}

/// PostgreSQL storage backend implementation.
pub struct PostgresStorageBackend {
    pool: PgPool,
}

impl PostgresStorageBackend {
    /// Create a new PostgreSQL storage backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageBackend for PostgresStorageBackend {
    async fn create_parking_lot(&self, lot: ParkingLot) -> Result<ParkingLot, StorageError> {
        sqlx::query_as::<_, ParkingLot>(&format!(
            r#"
            INSERT INTO parking_lots ({PARKING_LOT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PARKING_LOT_COLUMNS}
            "#
        ))
        .bind(lot.id)
        .bind(&lot.name)
        .bind(&lot.location)
        .bind(lot.total_spaces)
        .bind(lot.available_spaces)
        .bind(lot.charging_fee_per_hour)
        .bind(lot.created_at)
        .bind(lot.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("Parking lot named '{}' already exists", lot.name)
            })
        })
    }

    async fn get_parking_lot(&self, id: Uuid) -> Result<Option<ParkingLot>, StorageError> {
        sqlx::query_as::<_, ParkingLot>(&format!(
            "SELECT {PARKING_LOT_COLUMNS} FROM parking_lots WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn list_parking_lots(&self) -> Result<Vec<ParkingLot>, StorageError> {
        sqlx::query_as::<_, ParkingLot>(&format!(
            "SELECT {PARKING_LOT_COLUMNS} FROM parking_lots ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn register_car_entry(
        &self,
        entry: CarEntry,
    ) -> Result<(CarEntry, ParkingLot), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        // Zero rows means either no such lot or no space left.
        let lot = sqlx::query_as::<_, ParkingLot>(&format!(
            r#"
            UPDATE parking_lots
            SET available_spaces = available_spaces - 1, updated_at = NOW()
            WHERE id = $1 AND available_spaces > 0
            RETURNING {PARKING_LOT_COLUMNS}
            "#
        ))
        .bind(entry.parking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        let lot = match lot {
            Some(lot) => lot,
            None => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM parking_lots WHERE id = $1)",
                )
                .bind(entry.parking_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

                return Err(if exists {
                    StorageError::CapacityExceeded {
                        parking_id: entry.parking_id,
                    }
                } else {
                    StorageError::not_found("Parking lot", entry.parking_id)
                });
            }
        };

        let entry = sqlx::query_as::<_, CarEntry>(&format!(
            r#"
            INSERT INTO car_entries ({CAR_ENTRY_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CAR_ENTRY_COLUMNS}
            "#
        ))
        .bind(entry.id)
        .bind(&entry.plate_number)
        .bind(entry.parking_id)
        .bind(entry.entry_date_time)
        .bind(entry.exit_date_time)
        .bind(entry.charged_amount)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        Ok((entry, lot))
    }

    async fn record_car_exit(
        &self,
        car_entry_id: Uuid,
        exit_date_time: DateTime<Utc>,
        charged_amount: f64,
    ) -> Result<(CarEntry, ParkingLot), StorageError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        let current = sqlx::query_as::<_, CarEntry>(&format!(
            "SELECT {CAR_ENTRY_COLUMNS} FROM car_entries WHERE id = $1 FOR UPDATE"
        ))
        .bind(car_entry_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?
        .ok_or_else(|| StorageError::not_found("Car entry", car_entry_id))?;

        if current.exit_date_time.is_some() {
            return Err(StorageError::AlreadyExited { car_entry_id });
        }

        let entry = sqlx::query_as::<_, CarEntry>(&format!(
            r#"
            UPDATE car_entries
            SET exit_date_time = $2, charged_amount = $3, updated_at = NOW()
            WHERE id = $1 AND exit_date_time IS NULL
            RETURNING {CAR_ENTRY_COLUMNS}
            "#
        ))
        .bind(car_entry_id)
        .bind(exit_date_time)
        .bind(charged_amount)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?
        .ok_or(StorageError::AlreadyExited { car_entry_id })?;

        let lot = sqlx::query_as::<_, ParkingLot>(&format!(
            r#"
            UPDATE parking_lots
            SET available_spaces = LEAST(available_spaces + 1, total_spaces), updated_at = NOW()
            WHERE id = $1
            RETURNING {PARKING_LOT_COLUMNS}
            "#
        ))
        .bind(entry.parking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?
        .ok_or_else(|| StorageError::not_found("Parking lot", entry.parking_id))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::ConnectionError(e.to_string()))?;

        Ok((entry, lot))
    }

    async fn get_car_entry(&self, id: Uuid) -> Result<Option<CarEntry>, StorageError> {
        sqlx::query_as::<_, CarEntry>(&format!(
            "SELECT {CAR_ENTRY_COLUMNS} FROM car_entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn list_car_entries(&self) -> Result<Vec<CarEntry>, StorageError> {
        sqlx::query_as::<_, CarEntry>(&format!(
            "SELECT {CAR_ENTRY_COLUMNS} FROM car_entries ORDER BY entry_date_time DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn create_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles ({VEHICLE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vehicle.id)
        .bind(&vehicle.plate_number)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.owner_id)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("Vehicle with plate number {} already exists", vehicle.plate_number)
            })
        })
    }

    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, StorageError> {
        sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn get_vehicle_by_plate(
        &self,
        plate_number: &str,
    ) -> Result<Option<Vehicle>, StorageError> {
        sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE plate_number = $1"
        ))
        .bind(plate_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn list_vehicles_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, StorageError> {
        sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE owner_id = $1 ORDER BY created_at"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))
    }

    async fn update_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET plate_number = $2, vehicle_type = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vehicle.id)
        .bind(&vehicle.plate_number)
        .bind(vehicle.vehicle_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!("Vehicle with plate number {} already exists", vehicle.plate_number)
            })
        })?
        .ok_or_else(|| StorageError::not_found("Vehicle", vehicle.id))
    }

    async fn delete_vehicle(&self, id: Uuid) -> Result<(), StorageError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::ConnectionError(e.to_string()))?
        .rows_affected();

        if rows_affected == 0 {
            Err(StorageError::not_found("Vehicle", id))
        } else {
            Ok(())
        }
    }
}
