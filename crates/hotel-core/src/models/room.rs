//! Room inventory model
//!
//! Rooms are owned by the inventory subsystem; the reservation core reads
//! type and base price, and writes `status` as a side effect of housekeeping
//! task completion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Room status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "Available"),
            RoomStatus::Occupied => write!(f, "Occupied"),
            RoomStatus::Cleaning => write!(f, "Cleaning"),
            RoomStatus::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl RoomStatus {
    /// Parse from string, rejecting unknown values
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(RoomStatus::Available),
            "Occupied" => Some(RoomStatus::Occupied),
            "Cleaning" => Some(RoomStatus::Cleaning),
            "Maintenance" => Some(RoomStatus::Maintenance),
            _ => None,
        }
    }
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: i32,

    /// Display number, e.g. "202"
    pub room_number: String,

    /// Room type name, e.g. "Suite", "Sea View"
    pub room_type: String,

    /// Nightly base price
    pub base_price: Decimal,

    /// Guest capacity
    pub capacity: i32,

    /// Current status
    pub status: RoomStatus,

    /// Comma-separated amenity list
    pub amenities: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in ["Available", "Occupied", "Cleaning", "Maintenance"] {
            assert_eq!(RoomStatus::from_str(s).unwrap().to_string(), s);
        }
        assert!(RoomStatus::from_str("Dirty").is_none());
    }
}
