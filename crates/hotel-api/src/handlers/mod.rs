//! HTTP handlers

pub mod audit;
pub mod booking;
pub mod pricing;
pub mod room;
pub mod task;
pub mod ws;

pub use audit::configure as configure_audit;
pub use booking::configure as configure_bookings;
pub use pricing::configure as configure_pricing;
pub use room::configure as configure_rooms;
pub use task::configure as configure_tasks;
