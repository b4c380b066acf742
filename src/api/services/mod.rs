//! Services module - business logic between the HTTP routes and storage.

pub mod billing;
pub mod car_entry_service;
pub mod error;
pub mod jwt_service;
pub mod parking_service;
pub mod validation;
pub mod vehicle_service;

// Re-export for convenience
pub use billing::BillingPolicy;
pub use car_entry_service::{
    CarEntryService, CreateCarEntryRequest, RecordExitRequest, RegisteredEntry, SettledEntry,
};
pub use error::ParkingError;
pub use jwt_service::{Claims, JwtService, SharedJwtService, TokenPair, TokenType};
pub use parking_service::{CreateParkingLotRequest, ParkingService};
pub use vehicle_service::{CreateVehicleRequest, UpdateVehicleRequest, VehicleService};
