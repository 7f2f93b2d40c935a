//! Data transfer objects for the HTTP API

pub mod audit;
pub mod booking;
pub mod common;
pub mod pricing;
pub mod room;
pub mod task;

pub use audit::{AuditLogListResponse, AuditLogQueryParams, AuditLogResponse};
pub use booking::{
    BookingResponse, CreateBookingRequest, StatusUpdateRequest, UpdateBookingRequest,
};
pub use common::{ApiResponse, PaginationParams};
pub use pricing::{PriceHistoryResponse, PriceRuleResponse, QuoteQuery, QuoteResponse};
pub use room::{RoomResponse, RoomStatusRequest};
pub use task::{CreateTaskRequest, TaskResponse, TaskStatusRequest};
