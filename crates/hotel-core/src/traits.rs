//! Common traits for repositories and external collaborators
//!
//! The pricing engine is generic over these seams so that rule lookup,
//! history persistence and the advisor can be mocked in tests. Notification
//! delivery is modeled as a fire-and-forget sink.

use crate::error::AppError;
use crate::models::{AdvisorRecommendation, NewPriceHistory, PriceHistory, PriceRule};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read access to pricing rules
#[async_trait]
pub trait PriceRuleRepository: Send + Sync {
    /// All active rules whose validity window contains `date`
    async fn find_active_for_date(&self, date: NaiveDate) -> Result<Vec<PriceRule>, AppError>;
}

/// Append-only price history store
#[async_trait]
pub trait PriceHistoryRepository: Send + Sync {
    /// Append one computation record; history rows are never mutated
    async fn append(&self, entry: &NewPriceHistory) -> Result<PriceHistory, AppError>;
}

/// External pricing advisor
///
/// Implementations must bound their own latency; unavailability is signalled
/// with `AppError::AdvisorUnavailable` and absorbed by the pricing engine.
#[async_trait]
pub trait PricingAdvisor: Send + Sync {
    /// Ask for a recommended absolute price for a room type on a date
    async fn recommend(
        &self,
        room_type: &str,
        date: NaiveDate,
    ) -> Result<AdvisorRecommendation, AppError>;
}

/// Best-effort notification sink
///
/// Delivery is fire-and-forget from the core's perspective: implementations
/// must not fail the calling operation and must not block it for long.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A booking changed (created, updated, transitioned)
    async fn booking_updated(&self, id: i32, status: &str);

    /// A room's status changed
    async fn room_updated(&self, id: i32, status: &str);

    /// A staff task was created or changed
    async fn task_updated(&self, id: i32, status: &str);
}

/// No-op notifier for tests and headless tools
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn booking_updated(&self, _id: i32, _status: &str) {}
    async fn room_updated(&self, _id: i32, _status: &str) {}
    async fn task_updated(&self, _id: i32, _status: &str) {}
}
