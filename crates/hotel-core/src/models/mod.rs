//! Domain models for the hotel backend
//!
//! This module contains all the core domain models used throughout the application.

pub mod actor;
pub mod audit;
pub mod booking;
pub mod pricing;
pub mod room;
pub mod task;

pub use actor::{Actor, Role};
pub use audit::{AuditLog, AuditLogData};
pub use booking::{Booking, BookingStatus, BookingUpdate, NewBooking};
pub use pricing::{
    AdvisorRecommendation, NewPriceHistory, PriceHistory, PriceQuote, PriceRule, PriceSource,
};
pub use room::{Room, RoomStatus};
pub use task::{NewStaffTask, StaffTask, TaskStatus, TaskType};
