//! HTTP API layer for the hotel backend
//!
//! DTOs, actix-web handlers and the WebSocket notification fan-out.

#![forbid(unsafe_code)]

pub mod dto;
pub mod extract;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

// Re-export handler configuration functions and the WebSocket broadcaster
pub use handlers::ws::{ws_handler, WsBroadcaster};
pub use handlers::{
    configure_audit, configure_bookings, configure_pricing, configure_rooms, configure_tasks,
};

/// Pricing engine wired to the production repositories and HTTP advisor
pub type AppPricingEngine = hotel_services::PricingEngine<
    hotel_db::repositories::PgPriceRuleRepository,
    hotel_db::repositories::PgPriceHistoryRepository,
    hotel_services::HttpPricingAdvisor,
>;
