//! Room DTOs

use chrono::{DateTime, Utc};
use hotel_core::models::Room;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Room response DTO
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: i32,
    pub room_number: String,
    pub room_type: String,
    pub base_price: Decimal,
    pub capacity: i32,
    pub status: String,
    pub amenities: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            room_number: room.room_number,
            room_type: room.room_type,
            base_price: room.base_price,
            capacity: room.capacity,
            status: room.status.to_string(),
            amenities: room.amenities,
            created_at: room.created_at,
        }
    }
}

/// Request body for a room status change
#[derive(Debug, Deserialize)]
pub struct RoomStatusRequest {
    /// Target status, e.g. "Maintenance"
    pub status: String,
}
