//! Car-entry lifecycle: register an entry, record its exit, and project tickets and bills.
//!
//! An entry is `Active` until its exit is recorded and `Settled` afterwards.
//! Recording an exit is the only transition and happens at most once; a second
//! attempt is rejected so the lot's capacity is never released twice.

use super::billing::BillingPolicy;
use super::error::ParkingError;
use super::validation::{PLATE_NUMBER_REGEX, parse_uuid};
use crate::models::{Bill, CarEntry, CarEntryView, ParkingLot, Ticket};
use crate::storage::{StorageBackend, UserContext};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request to register a car entering a lot
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarEntryRequest {
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
    /// Identifier of the parking lot
    pub parking_code: String,
}

/// Request to record a car leaving
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordExitRequest {
    /// Defaults to the current time
    #[serde(default)]
    pub exit_date_time: Option<DateTime<Utc>>,
    /// Accepted for client compatibility; the charge is always computed server-side
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Charged amount cannot be negative"))]
    pub charged_amount: Option<f64>,
}

/// Result of a successful entry registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredEntry {
    pub car_entry: CarEntry,
    pub ticket: Ticket,
}

/// Result of a successful exit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettledEntry {
    pub car_entry: CarEntry,
    pub bill: Bill,
}

fn require_lot_manager(user: &UserContext, action: &str) -> Result<(), ParkingError> {
    if user.role.can_manage_lots() {
        Ok(())
    } else {
        warn!(
            "User {} with role {:?} attempted to {}",
            user.user_id, user.role, action
        );
        Err(ParkingError::Forbidden(format!(
            "Only admins and parking attendants can {}",
            action
        )))
    }
}

/// Car-entry lifecycle manager.
#[derive(Clone)]
pub struct CarEntryService {
    storage: Arc<dyn StorageBackend>,
    billing: BillingPolicy,
}

impl CarEntryService {
    pub fn new(storage: Arc<dyn StorageBackend>, billing: BillingPolicy) -> Self {
        Self { storage, billing }
    }

    /// Register a car entering a lot, taking one of its spaces.
    pub async fn register_entry(
        &self,
        user: &UserContext,
        request: CreateCarEntryRequest,
    ) -> Result<RegisteredEntry, ParkingError> {
        require_lot_manager(user, "register car entries")?;
        request.validate()?;
        let parking_id = parse_uuid(&request.parking_code, "Parking code must be a valid UUID")?;

        let entry = CarEntry::new(request.plate_number, parking_id, Utc::now());
        let (car_entry, lot) = self.storage.register_car_entry(entry).await.map_err(|e| {
            warn!("Car entry for lot {} rejected: {}", parking_id, e);
            ParkingError::from(e)
        })?;

        info!(
            "Registered car entry {} for {} in lot {} ({} spaces left)",
            car_entry.id, car_entry.plate_number, lot.name, lot.available_spaces
        );

        let ticket = Ticket::new(&car_entry, &lot);
        Ok(RegisteredEntry { car_entry, ticket })
    }

    /// Record a car leaving, compute its charge and release its space.
    pub async fn record_exit(
        &self,
        user: &UserContext,
        car_entry_id: Uuid,
        request: RecordExitRequest,
    ) -> Result<SettledEntry, ParkingError> {
        require_lot_manager(user, "update car exits")?;
        request.validate()?;

        let current = self
            .storage
            .get_car_entry(car_entry_id)
            .await?
            .ok_or_else(|| ParkingError::not_found("Car entry", car_entry_id))?;
        if !current.is_active() {
            warn!("Car entry {} has already exited", car_entry_id);
            return Err(ParkingError::AlreadyExited { car_entry_id });
        }

        let exit_date_time = match request.exit_date_time {
            Some(exit) if exit <= current.entry_date_time => {
                return Err(ParkingError::Validation(
                    "Exit time must be after entry time".to_string(),
                ));
            }
            Some(exit) => exit,
            // a clock step backwards must still leave exit after entry
            None => Utc::now().max(current.entry_date_time + Duration::milliseconds(1)),
        };
        if request.charged_amount.is_some() {
            warn!(
                "Ignoring client-supplied charged amount for car entry {}",
                car_entry_id
            );
        }

        let lot = self
            .storage
            .get_parking_lot(current.parking_id)
            .await?
            .ok_or_else(|| ParkingError::not_found("Parking lot", current.parking_id))?;
        let charged_amount =
            self.billing
                .charge(current.entry_date_time, exit_date_time, lot.charging_fee_per_hour);

        let (car_entry, lot) = self
            .storage
            .record_car_exit(car_entry_id, exit_date_time, charged_amount)
            .await?;

        info!(
            "Car entry {} exited lot {} charged {:.2} ({} spaces available)",
            car_entry.id, lot.name, car_entry.charged_amount, lot.available_spaces
        );

        let bill = Bill::new(&car_entry, &lot).ok_or(ParkingError::NotExited { car_entry_id })?;
        Ok(SettledEntry { car_entry, bill })
    }

    /// All entries with their lot name and display fields.
    pub async fn list_entries(&self, user: &UserContext) -> Result<Vec<CarEntryView>, ParkingError> {
        require_lot_manager(user, "view car entries")?;

        let lots: HashMap<Uuid, ParkingLot> = self
            .storage
            .list_parking_lots()
            .await?
            .into_iter()
            .map(|lot| (lot.id, lot))
            .collect();

        let entries = self.storage.list_car_entries().await?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let parking_name = lots
                    .get(&entry.parking_id)
                    .map(|lot| lot.name.clone())
                    .unwrap_or_default();
                CarEntryView::new(entry, parking_name)
            })
            .collect())
    }

    pub async fn get_ticket(
        &self,
        user: &UserContext,
        car_entry_id: Uuid,
    ) -> Result<Ticket, ParkingError> {
        require_lot_manager(user, "view tickets")?;
        let (entry, lot) = self.load_with_lot(car_entry_id).await?;
        Ok(Ticket::new(&entry, &lot))
    }

    pub async fn get_bill(&self, user: &UserContext, car_entry_id: Uuid) -> Result<Bill, ParkingError> {
        require_lot_manager(user, "view bills")?;
        let (entry, lot) = self.load_with_lot(car_entry_id).await?;
        Bill::new(&entry, &lot).ok_or(ParkingError::NotExited { car_entry_id })
    }

    async fn load_with_lot(&self, car_entry_id: Uuid) -> Result<(CarEntry, ParkingLot), ParkingError> {
        let entry = self
            .storage
            .get_car_entry(car_entry_id)
            .await?
            .ok_or_else(|| ParkingError::not_found("Car entry", car_entry_id))?;
        let lot = self
            .storage
            .get_parking_lot(entry.parking_id)
            .await?
            .ok_or_else(|| ParkingError::not_found("Parking lot", entry.parking_id))?;
        Ok((entry, lot))
    }
}
