//! Booking repository
//!
//! Pool-backed reads plus executor-generic helpers for the booking critical
//! section. The overlap check and the subsequent insert/update must run on
//! the same transaction: the per-room lock reduces the race window, but the
//! transaction is the authoritative guard against double booking.

use chrono::{DateTime, Utc};
use hotel_core::models::{Booking, BookingStatus, BookingUpdate, NewBooking};
use hotel_core::{AppError, AppResult};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use tracing::{debug, error, instrument};

/// Status strings come from a closed set; a row that fails to parse is
/// corrupt data, not a default.
fn parse_status(raw: &str) -> Result<BookingStatus, sqlx::Error> {
    BookingStatus::from_str(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown booking status '{}'", raw).into(),
    })
}

fn map_booking(row: PgRow) -> Result<Booking, sqlx::Error> {
    let status: String = row.get("status");
    Ok(Booking {
        id: row.get("id"),
        room_id: row.get("room_id"),
        check_in: row.get("check_in"),
        check_out: row.get("check_out"),
        status: parse_status(&status)?,
        final_price: row.get("final_price"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Check whether `[check_in, check_out)` collides with any non-cancelled
/// booking on the room, optionally ignoring one booking id (the update path).
///
/// Half-open semantics: back-to-back stays do not conflict.
pub async fn has_overlap<'e, E>(
    executor: E,
    room_id: i32,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    exclude_booking_id: Option<i32>,
) -> AppResult<bool>
where
    E: PgExecutor<'e>,
{
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM bookings b
            WHERE b.room_id = $1
              AND b.status <> 'Cancelled'
              AND b.check_in < $3
              AND $2 < b.check_out
              AND ($4::INT4 IS NULL OR b.id <> $4)
        )
        "#,
    )
    .bind(room_id)
    .bind(check_in)
    .bind(check_out)
    .bind(exclude_booking_id)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        error!("Overlap check failed for room {}: {}", room_id, e);
        AppError::Database(format!("Overlap check failed: {}", e))
    })?;

    Ok(exists)
}

/// Insert a booking on the caller's executor (normally a transaction)
pub async fn insert<'e, E>(executor: E, booking: &NewBooking) -> AppResult<Booking>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"
        INSERT INTO bookings (room_id, check_in, check_out, status, final_price, user_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, room_id, check_in, check_out, status, final_price, user_id,
                  created_at, updated_at
        "#,
    )
    .bind(booking.room_id)
    .bind(booking.check_in)
    .bind(booking.check_out)
    .bind(booking.status.to_string())
    .bind(booking.final_price)
    .bind(booking.user_id)
    .try_map(map_booking)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        error!("Failed to insert booking: {}", e);
        AppError::Database(format!("Failed to insert booking: {}", e))
    })?;

    Ok(row)
}

/// Update a booking's stay details on the caller's executor
pub async fn update_stay<'e, E>(
    executor: E,
    id: i32,
    update: &BookingUpdate,
) -> AppResult<Booking>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"
        UPDATE bookings
        SET room_id = $2,
            check_in = $3,
            check_out = $4,
            final_price = $5,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, room_id, check_in, check_out, status, final_price, user_id,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(update.room_id)
    .bind(update.check_in)
    .bind(update.check_out)
    .bind(update.final_price)
    .try_map(map_booking)
    .fetch_optional(executor)
    .await
    .map_err(|e| {
        error!("Failed to update booking {}: {}", id, e);
        AppError::Database(format!("Failed to update booking: {}", e))
    })?
    .ok_or(AppError::BookingNotFound(id))?;

    Ok(row)
}

/// Set a booking's status on the caller's executor
pub async fn set_status<'e, E>(executor: E, id: i32, status: BookingStatus) -> AppResult<Booking>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"
        UPDATE bookings
        SET status = $2,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, room_id, check_in, check_out, status, final_price, user_id,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status.to_string())
    .try_map(map_booking)
    .fetch_optional(executor)
    .await
    .map_err(|e| {
        error!("Failed to set status for booking {}: {}", id, e);
        AppError::Database(format!("Failed to set booking status: {}", e))
    })?
    .ok_or(AppError::BookingNotFound(id))?;

    Ok(row)
}

/// PostgreSQL booking repository for read paths
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT id, room_id, check_in, check_out, status, final_price, user_id,
                   created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .try_map(map_booking)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch booking: {}", e)))?;

        Ok(row)
    }

    /// List bookings, newest check-in first
    #[instrument(skip(self))]
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Booking>> {
        debug!("Listing bookings limit={} offset={}", limit, offset);

        let rows = sqlx::query(
            r#"
            SELECT id, room_id, check_in, check_out, status, final_price, user_id,
                   created_at, updated_at
            FROM bookings
            ORDER BY check_in DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .try_map(map_booking)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list bookings: {}", e)))?;

        Ok(rows)
    }

    /// List bookings owned by a user, newest check-in first
    #[instrument(skip(self))]
    pub async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_id, check_in, check_out, status, final_price, user_id,
                   created_at, updated_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY check_in DESC
            "#,
        )
        .bind(user_id)
        .try_map(map_booking)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list user bookings: {}", e)))?;

        Ok(rows)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_round_trip() {
        assert_eq!(parse_status("Paid").unwrap(), BookingStatus::Paid);
        assert_eq!(parse_status("Cancelled").unwrap(), BookingStatus::Cancelled);
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        let err = parse_status("CheckedIn").unwrap_err();
        assert!(matches!(err, sqlx::Error::ColumnDecode { .. }));
        // no silent fallback to the default status
        assert!(parse_status("").is_err());
        assert!(parse_status("pending").is_err());
    }
}
