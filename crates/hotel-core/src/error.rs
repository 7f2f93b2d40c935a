//! Unified error handling for the hotel backend
//!
//! This module provides a comprehensive error type that covers all possible
//! failure scenarios in the application, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    // ==================== Reservation Errors ====================
    /// The per-room lock could not be acquired within the timeout.
    /// Retryable: the room is being mutated by another request.
    #[error("Room {0} is currently being booked by another request, try again shortly")]
    ResourceBusy(i32),

    /// The requested stay overlaps an existing non-cancelled booking.
    /// Not retryable as-is; the caller must pick other dates or a room.
    #[error("Room {0} is already booked for these dates")]
    SchedulingConflict(i32),

    /// A booking status transition that the state machine forbids.
    #[error("Invalid booking state: {0}")]
    InvalidState(String),

    // ==================== Pricing Errors ====================
    /// The external pricing advisor could not be reached or returned
    /// garbage. Absorbed inside the pricing engine; never fatal to a quote.
    #[error("Pricing advisor unavailable: {0}")]
    AdvisorUnavailable(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Resource Errors ====================
    #[error("Room not found: {0}")]
    RoomNotFound(i32),

    #[error("Booking not found: {0}")]
    BookingNotFound(i32),

    #[error("Task not found: {0}")]
    TaskNotFound(i32),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::SchedulingConflict(_)
            | AppError::InvalidState(_)
            | AppError::Validation(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 403 Forbidden
            AppError::Forbidden => StatusCode::FORBIDDEN,

            // 404 Not Found
            AppError::RoomNotFound(_)
            | AppError::BookingNotFound(_)
            | AppError::TaskNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::ResourceBusy(_) => StatusCode::CONFLICT,

            // 503 Service Unavailable
            AppError::AdvisorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Transaction(_) => "transaction_error",
            AppError::ResourceBusy(_) => "resource_busy",
            AppError::SchedulingConflict(_) => "scheduling_conflict",
            AppError::InvalidState(_) => "invalid_state",
            AppError::AdvisorUnavailable(_) => "advisor_unavailable",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::RoomNotFound(_) => "room_not_found",
            AppError::BookingNotFound(_) => "booking_not_found",
            AppError::TaskNotFound(_) => "task_not_found",
            AppError::NotFound(_) => "not_found",
            AppError::Forbidden => "forbidden",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// Whether a caller may reasonably retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::ResourceBusy(_)
                | AppError::Database(_)
                | AppError::Pool(_)
                | AppError::Transaction(_)
        )
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
            "retryable": self.is_retryable(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ResourceBusy(101).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::SchedulingConflict(101).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BookingNotFound(42).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidState("already cancelled".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::ResourceBusy(1).error_code(), "resource_busy");
        assert_eq!(
            AppError::SchedulingConflict(1).error_code(),
            "scheduling_conflict"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(AppError::ResourceBusy(1).is_retryable());
        assert!(!AppError::SchedulingConflict(1).is_retryable());
        assert!(!AppError::InvalidState("x".into()).is_retryable());
    }
}
