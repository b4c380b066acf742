use super::enums::CarEntryStatus;
use super::parking_lot::ParkingLot;
use crate::services::billing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Display format used by the dashboard tables, e.g. "Mar 4, 2025 09:30".
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y %H:%M";

/// One vehicle's occupancy of one parking space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CarEntry {
    pub id: Uuid,
    pub plate_number: String,
    pub parking_id: Uuid,
    pub entry_date_time: DateTime<Utc>,
    pub exit_date_time: Option<DateTime<Utc>>,
    pub charged_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CarEntry {
    pub fn new(plate_number: String, parking_id: Uuid, entry_date_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            plate_number,
            parking_id,
            entry_date_time,
            exit_date_time: None,
            charged_amount: 0.0,
            created_at: entry_date_time,
            updated_at: entry_date_time,
        }
    }

    pub fn status(&self) -> CarEntryStatus {
        match self.exit_date_time {
            Some(_) => CarEntryStatus::Settled,
            None => CarEntryStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.exit_date_time.is_none()
    }
}

/// Read projection handed out when a vehicle enters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub plate_number: String,
    pub parking_id: Uuid,
    pub parking_name: String,
    pub charging_fee_per_hour: f64,
    pub entry_date_time: DateTime<Utc>,
}

impl Ticket {
    pub fn new(entry: &CarEntry, lot: &ParkingLot) -> Self {
        Self {
            id: entry.id,
            plate_number: entry.plate_number.clone(),
            parking_id: lot.id,
            parking_name: lot.name.clone(),
            charging_fee_per_hour: lot.charging_fee_per_hour,
            entry_date_time: entry.entry_date_time,
        }
    }
}

/// Read projection of a settled entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: Uuid,
    pub plate_number: String,
    pub parking_name: String,
    pub entry_date_time: DateTime<Utc>,
    pub exit_date_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub charging_fee_per_hour: f64,
    pub charged_amount: f64,
}

impl Bill {
    /// Returns `None` while the entry is still active.
    pub fn new(entry: &CarEntry, lot: &ParkingLot) -> Option<Self> {
        let exit = entry.exit_date_time?;
        Some(Self {
            id: entry.id,
            plate_number: entry.plate_number.clone(),
            parking_name: lot.name.clone(),
            entry_date_time: entry.entry_date_time,
            exit_date_time: exit,
            duration_hours: billing::duration_hours(entry.entry_date_time, exit),
            charging_fee_per_hour: lot.charging_fee_per_hour,
            charged_amount: entry.charged_amount,
        })
    }
}

/// Row returned by the entry listing, with pre-formatted display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarEntryView {
    #[serde(flatten)]
    pub entry: CarEntry,
    pub parking_name: String,
    pub status: CarEntryStatus,
    pub entry_date_time_display: String,
    pub exit_date_time_display: String,
    pub charged_amount_display: String,
}

impl CarEntryView {
    pub fn new(entry: CarEntry, parking_name: String) -> Self {
        let entry_date_time_display = entry.entry_date_time.format(DISPLAY_DATE_FORMAT).to_string();
        let exit_date_time_display = entry
            .exit_date_time
            .map(|t| t.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_default();
        let charged_amount_display = format!("{:.2}", entry.charged_amount);
        Self {
            status: entry.status(),
            entry,
            parking_name,
            entry_date_time_display,
            exit_date_time_display,
            charged_amount_display,
        }
    }
}
