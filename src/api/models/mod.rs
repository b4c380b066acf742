// Models module - contains ParkingLot, CarEntry (with its projections), Vehicle, and enums

pub mod car_entry;
pub mod enums;
pub mod parking_lot;
pub mod vehicle;

pub use car_entry::{Bill, CarEntry, CarEntryView, Ticket};
pub use enums::{CarEntryStatus, Role, VehicleType};
pub use parking_lot::ParkingLot;
pub use vehicle::Vehicle;
