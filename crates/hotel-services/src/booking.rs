//! Booking orchestration
//!
//! Every mutation of a booking takes the room's advisory lock, runs its
//! checks and writes inside one transaction, and releases the lock before
//! reporting back. Audit entries and notifications go out only after the
//! transaction has committed; a failed audit write or slow subscriber never
//! undoes a committed booking.

use chrono::Utc;
use hotel_core::config::BookingConfig;
use hotel_core::models::{
    Actor, AuditLog, Booking, BookingStatus, BookingUpdate, NewBooking, NewStaffTask, StaffTask,
};
use hotel_core::traits::Notifier;
use hotel_core::{AppError, AppResult};
use hotel_db::repositories::{booking_repo, task_repo, PgBookingRepository, PgRoomRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::lock::RoomLockRegistry;

/// Guard the late-cancellation window
///
/// Privileged actors may cancel at any time; everyone else must be outside
/// the window. Already-terminal bookings are rejected before this runs.
pub fn cancellation_allowed(
    hours_to_check_in: i64,
    window_hours: i64,
    privileged: bool,
) -> Result<(), AppError> {
    if hours_to_check_in < window_hours && !privileged {
        return Err(AppError::InvalidState(format!(
            "Cancellation requires at least {} hours notice before check-in",
            window_hours
        )));
    }
    Ok(())
}

/// Booking service
pub struct BookingService {
    pool: PgPool,
    bookings: PgBookingRepository,
    rooms: PgRoomRepository,
    locks: Arc<RoomLockRegistry>,
    notifier: Arc<dyn Notifier>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(
        pool: PgPool,
        locks: Arc<RoomLockRegistry>,
        notifier: Arc<dyn Notifier>,
        config: BookingConfig,
    ) -> Self {
        Self {
            bookings: PgBookingRepository::new(pool.clone()),
            rooms: PgRoomRepository::new(pool.clone()),
            pool,
            locks,
            notifier,
            config,
        }
    }

    /// Fetch a booking by id
    pub async fn get(&self, id: i32) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or(AppError::BookingNotFound(id))
    }

    /// List bookings, newest check-in first
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        self.bookings.list(limit, offset).await
    }

    /// List bookings owned by a user
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        self.bookings.list_by_user(user_id).await
    }

    /// Create a booking
    ///
    /// Acquires the room lock with a bounded wait, then re-checks the stay
    /// interval against existing bookings inside the insert transaction. The
    /// lock is released on every path, success or failure.
    #[instrument(skip(self, actor), fields(room_id = new_booking.room_id))]
    pub async fn create_booking(
        &self,
        mut new_booking: NewBooking,
        actor: &Actor,
    ) -> AppResult<Booking> {
        if new_booking.check_in >= new_booking.check_out {
            return Err(AppError::InvalidInput(
                "check_in must be before check_out".to_string(),
            ));
        }
        new_booking.user_id = actor.id;

        let room_id = new_booking.room_id;
        self.rooms
            .find_by_id(room_id)
            .await?
            .ok_or(AppError::RoomNotFound(room_id))?;

        if !self.locks.acquire(room_id).await {
            return Err(AppError::ResourceBusy(room_id));
        }
        let result = self.create_in_tx(&new_booking).await;
        self.locks.release(room_id);
        let booking = result?;

        info!("Created booking {} for room {}", booking.id, room_id);

        AuditLog::builder()
            .action("BOOKING_CREATE")
            .performed_by(&actor.name)
            .details(format!(
                "Booking for room {} from {} to {} at {}",
                room_id, booking.check_in, booking.check_out, booking.final_price
            ))
            .entity_type("Booking")
            .entity_id(booking.id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .booking_updated(booking.id, &booking.status.to_string())
            .await;

        Ok(booking)
    }

    async fn create_in_tx(&self, new_booking: &NewBooking) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(format!("Failed to begin transaction: {}", e)))?;

        if booking_repo::has_overlap(
            &mut *tx,
            new_booking.room_id,
            new_booking.check_in,
            new_booking.check_out,
            None,
        )
        .await?
        {
            return Err(AppError::SchedulingConflict(new_booking.room_id));
        }

        let booking = booking_repo::insert(&mut *tx, new_booking).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(format!("Failed to commit booking: {}", e)))?;

        Ok(booking)
    }

    /// Update a booking's stay details
    ///
    /// The update path takes the same room lock as creation and excludes the
    /// booking itself from the overlap check, so a stay can be shortened or
    /// shifted within its own window.
    #[instrument(skip(self, actor))]
    pub async fn update_booking(
        &self,
        id: i32,
        update: BookingUpdate,
        actor: &Actor,
    ) -> AppResult<Booking> {
        if update.check_in >= update.check_out {
            return Err(AppError::InvalidInput(
                "check_in must be before check_out".to_string(),
            ));
        }

        let existing = self.get(id).await?;
        if existing.status.is_terminal() {
            return Err(AppError::InvalidState(format!(
                "Booking {} is {} and can no longer be modified",
                id, existing.status
            )));
        }

        let room_id = update.room_id;
        self.rooms
            .find_by_id(room_id)
            .await?
            .ok_or(AppError::RoomNotFound(room_id))?;

        if !self.locks.acquire(room_id).await {
            return Err(AppError::ResourceBusy(room_id));
        }
        let result = self.update_in_tx(id, &update).await;
        self.locks.release(room_id);
        let booking = result?;

        AuditLog::builder()
            .action("BOOKING_UPDATE")
            .performed_by(&actor.name)
            .details(format!(
                "Booking moved to room {} from {} to {}",
                room_id, booking.check_in, booking.check_out
            ))
            .entity_type("Booking")
            .entity_id(id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .booking_updated(booking.id, &booking.status.to_string())
            .await;

        Ok(booking)
    }

    async fn update_in_tx(&self, id: i32, update: &BookingUpdate) -> AppResult<Booking> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(format!("Failed to begin transaction: {}", e)))?;

        if booking_repo::has_overlap(
            &mut *tx,
            update.room_id,
            update.check_in,
            update.check_out,
            Some(id),
        )
        .await?
        {
            return Err(AppError::SchedulingConflict(update.room_id));
        }

        let booking = booking_repo::update_stay(&mut *tx, id, update).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(format!("Failed to commit update: {}", e)))?;

        Ok(booking)
    }

    /// Transition a booking's status
    ///
    /// Transitions are validated against the status table. A checkout
    /// additionally enqueues a cleaning task in the same transaction, so a
    /// checked-out booking without its cleaning task cannot exist.
    #[instrument(skip(self, actor))]
    pub async fn update_status(
        &self,
        id: i32,
        new_status: BookingStatus,
        actor: &Actor,
    ) -> AppResult<Booking> {
        let existing = self.get(id).await?;
        if !existing.status.can_transition(new_status) {
            return Err(AppError::InvalidState(format!(
                "Cannot transition booking {} from {} to {}",
                id, existing.status, new_status
            )));
        }

        let room_id = existing.room_id;
        if !self.locks.acquire(room_id).await {
            return Err(AppError::ResourceBusy(room_id));
        }
        let result = self.transition_in_tx(id, room_id, new_status).await;
        self.locks.release(room_id);
        let (booking, cleaning_task) = result?;

        info!(
            "Booking {} transitioned {} -> {}",
            id, existing.status, new_status
        );

        AuditLog::builder()
            .action("BOOKING_STATUS_UPDATE")
            .performed_by(&actor.name)
            .details(format!("Status changed from {} to {}", existing.status, new_status))
            .entity_type("Booking")
            .entity_id(id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .booking_updated(booking.id, &booking.status.to_string())
            .await;
        if let Some(task) = &cleaning_task {
            self.notifier
                .task_updated(task.id, &task.status.to_string())
                .await;
        }

        Ok(booking)
    }

    async fn transition_in_tx(
        &self,
        id: i32,
        room_id: i32,
        new_status: BookingStatus,
    ) -> AppResult<(Booking, Option<StaffTask>)> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or(AppError::RoomNotFound(room_id))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Transaction(format!("Failed to begin transaction: {}", e)))?;

        let booking = booking_repo::set_status(&mut *tx, id, new_status).await?;

        let cleaning_task = if new_status == BookingStatus::CheckedOut {
            let task = task_repo::insert(
                &mut *tx,
                &NewStaffTask::checkout_cleaning(room_id, &room.room_number),
            )
            .await?;
            Some(task)
        } else {
            None
        };

        tx.commit()
            .await
            .map_err(|e| AppError::Transaction(format!("Failed to commit transition: {}", e)))?;

        Ok((booking, cleaning_task))
    }

    /// Cancel a booking
    ///
    /// Guests may cancel only up to the configured window before check-in;
    /// Admin and Manager actors may cancel at any time. Terminal bookings
    /// cannot be cancelled again.
    #[instrument(skip(self, actor))]
    pub async fn cancel_booking(&self, id: i32, actor: &Actor) -> AppResult<Booking> {
        let existing = self.get(id).await?;
        if !existing.status.can_transition(BookingStatus::Cancelled) {
            return Err(AppError::InvalidState(format!(
                "Booking {} is {} and cannot be cancelled",
                id, existing.status
            )));
        }

        cancellation_allowed(
            existing.hours_to_check_in(Utc::now()),
            self.config.cancellation_window_hours,
            actor.is_privileged(),
        )?;

        let room_id = existing.room_id;
        if !self.locks.acquire(room_id).await {
            return Err(AppError::ResourceBusy(room_id));
        }
        let result = self
            .transition_in_tx(id, room_id, BookingStatus::Cancelled)
            .await;
        self.locks.release(room_id);
        let (booking, _) = result?;

        info!("Booking {} cancelled by {}", id, actor.name);

        AuditLog::builder()
            .action("BOOKING_CANCEL")
            .performed_by(&actor.name)
            .details(format!("Booking for room {} cancelled", room_id))
            .entity_type("Booking")
            .entity_id(id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .booking_updated(booking.id, &booking.status.to_string())
            .await;

        Ok(booking)
    }

    /// Record a successful payment for a booking
    #[instrument(skip(self, actor))]
    pub async fn confirm_payment(&self, id: i32, actor: &Actor) -> AppResult<Booking> {
        let existing = self.get(id).await?;
        if !existing.status.can_transition(BookingStatus::Paid) {
            return Err(AppError::InvalidState(format!(
                "Cannot mark booking {} as Paid while {}",
                id, existing.status
            )));
        }

        let room_id = existing.room_id;
        if !self.locks.acquire(room_id).await {
            return Err(AppError::ResourceBusy(room_id));
        }
        let result = self.transition_in_tx(id, room_id, BookingStatus::Paid).await;
        self.locks.release(room_id);
        let (booking, _) = result?;

        AuditLog::builder()
            .action("PAYMENT_CONFIRMED")
            .performed_by(&actor.name)
            .details(format!("Payment of {} confirmed", booking.final_price))
            .entity_type("Booking")
            .entity_id(id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .booking_updated(booking.id, &booking.status.to_string())
            .await;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_outside_window_allowed() {
        assert!(cancellation_allowed(25, 24, false).is_ok());
        assert!(cancellation_allowed(24, 24, false).is_ok());
    }

    #[test]
    fn test_cancellation_inside_window_rejected_for_guests() {
        assert!(cancellation_allowed(23, 24, false).is_err());
        assert!(cancellation_allowed(0, 24, false).is_err());
        // check-in already passed
        assert!(cancellation_allowed(-5, 24, false).is_err());
    }

    #[test]
    fn test_privileged_actor_bypasses_window() {
        assert!(cancellation_allowed(1, 24, true).is_ok());
        assert!(cancellation_allowed(-5, 24, true).is_ok());
    }
}
