//! Business logic services for the hotel backend
//!
//! This crate contains the services that orchestrate reservations and
//! pricing on top of the repositories.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service owns its dependencies (repositories, lock registry, sinks)
//! - Services are wrapped in Arc for safe sharing across async tasks
//! - All operations are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `RoomLockRegistry` - Per-room advisory locks with bounded wait
//! - `PricingEngine` - Rule + advisor price composition with history trail
//! - `BookingService` - Reservation orchestration and status state machine
//! - `HousekeepingService` - Staff task lifecycle and room status side effects

pub mod advisor;
pub mod booking;
pub mod housekeeping;
pub mod lock;
pub mod pricing;

pub use advisor::HttpPricingAdvisor;
pub use booking::BookingService;
pub use housekeeping::HousekeepingService;
pub use lock::RoomLockRegistry;
pub use pricing::PricingEngine;

/// Business logic constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    /// Default per-room lock acquisition timeout
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

    /// Default advisor request timeout in milliseconds; independent of the
    /// lock timeout so a slow advisor never extends a room critical section
    pub const DEFAULT_ADVISOR_TIMEOUT_MS: u64 = 1500;

    /// Cancellations closer to check-in than this require a privileged actor
    pub const CANCELLATION_WINDOW_HOURS: i64 = 24;

    /// Fallback nightly base price for unrecognized room types
    pub const DEFAULT_BASE_PRICE: Decimal = dec!(100.0);
}
