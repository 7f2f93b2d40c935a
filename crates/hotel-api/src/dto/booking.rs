//! Booking DTOs

use chrono::{DateTime, Utc};
use hotel_core::models::Booking;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for creating a booking
///
/// The price is computed server-side from the room type and the pricing
/// engine; clients cannot set it.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Room to book
    #[validate(range(min = 1))]
    pub room_id: i32,

    /// Stay start, inclusive
    pub check_in: DateTime<Utc>,

    /// Stay end, exclusive
    pub check_out: DateTime<Utc>,
}

/// Request body for updating a booking's stay
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    #[validate(range(min = 1))]
    pub room_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

/// Request body for a status transition
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    /// Target status, e.g. "Confirmed"
    pub status: String,
}

/// Booking response DTO
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i32,
    pub room_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: String,
    pub final_price: Decimal,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            room_id: booking.room_id,
            check_in: booking.check_in,
            check_out: booking.check_out,
            status: booking.status.to_string(),
            final_price: booking.final_price,
            user_id: booking.user_id,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::models::BookingStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_booking_response_serialization() {
        let response = BookingResponse::from(Booking {
            id: 17,
            room_id: 202,
            check_in: Utc::now(),
            check_out: Utc::now(),
            status: BookingStatus::Confirmed,
            final_price: dec!(540.00),
            user_id: Some(3),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"Confirmed\""));
        assert!(json.contains("\"room_id\":202"));
    }

    #[test]
    fn test_create_request_rejects_bad_room_id() {
        use validator::Validate;

        let request = CreateBookingRequest {
            room_id: 0,
            check_in: Utc::now(),
            check_out: Utc::now(),
        };
        assert!(request.validate().is_err());
    }
}
