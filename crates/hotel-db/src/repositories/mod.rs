//! Repository implementations

pub mod audit_repo;
pub mod booking_repo;
pub mod price_history_repo;
pub mod price_rule_repo;
pub mod room_repo;
pub mod task_repo;

pub use audit_repo::PgAuditLogRepository;
pub use booking_repo::PgBookingRepository;
pub use price_history_repo::PgPriceHistoryRepository;
pub use price_rule_repo::PgPriceRuleRepository;
pub use room_repo::PgRoomRepository;
pub use task_repo::PgTaskRepository;
