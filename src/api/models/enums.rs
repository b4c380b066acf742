use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role carried in the caller's access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    ParkingAttendant,
    User,
}

impl Role {
    /// Admins and attendants may register entries, record exits and list entries.
    pub fn can_manage_lots(self) -> bool {
        matches!(self, Role::Admin | Role::ParkingAttendant)
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "vehicle_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Truck,
    Electric,
    Bus,
}

/// Lifecycle state of a car entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarEntryStatus {
    Active,
    Settled,
}
