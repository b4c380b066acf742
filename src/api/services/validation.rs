//! Shared input rules for request validation.

use super::error::ParkingError;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// Plate numbers: uppercase letters, digits and hyphens only.
pub static PLATE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9-]+$").expect("plate number pattern is valid"));

/// Parse an identifier supplied by the client, reporting `message` on failure.
pub fn parse_uuid(value: &str, message: &str) -> Result<Uuid, ParkingError> {
    Uuid::parse_str(value.trim()).map_err(|_| ParkingError::Validation(message.to_string()))
}
