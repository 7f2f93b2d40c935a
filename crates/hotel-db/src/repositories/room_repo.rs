//! Room repository
//!
//! Read access to the room inventory plus the single status write the
//! reservation core needs (housekeeping task completion).

use hotel_core::models::{Room, RoomStatus};
use hotel_core::{AppError, AppResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{error, instrument};

/// A status outside the closed set is corrupt data, not a default.
fn parse_status(raw: &str) -> Result<RoomStatus, sqlx::Error> {
    RoomStatus::from_str(raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown room status '{}'", raw).into(),
    })
}

fn map_room(row: PgRow) -> Result<Room, sqlx::Error> {
    let status: String = row.get("status");
    Ok(Room {
        id: row.get("id"),
        room_number: row.get("room_number"),
        room_type: row.get("room_type"),
        base_price: row.get("base_price"),
        capacity: row.get("capacity"),
        status: parse_status(&status)?,
        amenities: row.get("amenities"),
        created_at: row.get("created_at"),
    })
}

/// PostgreSQL room repository
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new room repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Room>> {
        let row = sqlx::query(
            r#"
            SELECT id, room_number, room_type, base_price, capacity, status,
                   amenities, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .try_map(map_room)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch room: {}", e)))?;

        Ok(row)
    }

    /// List all rooms ordered by room number
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<Room>> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_number, room_type, base_price, capacity, status,
                   amenities, created_at
            FROM rooms
            ORDER BY room_number
            "#,
        )
        .try_map(map_room)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list rooms: {}", e)))?;

        Ok(rows)
    }

    /// Update a room's status
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: i32, status: RoomStatus) -> AppResult<Room> {
        let row = sqlx::query(
            r#"
            UPDATE rooms
            SET status = $2
            WHERE id = $1
            RETURNING id, room_number, room_type, base_price, capacity, status,
                      amenities, created_at
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .try_map(map_room)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update room {} status: {}", id, e);
            AppError::Database(format!("Failed to update room status: {}", e))
        })?
        .ok_or(AppError::RoomNotFound(id))?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert_eq!(parse_status("Cleaning").unwrap(), RoomStatus::Cleaning);
        // no silent fallback to Available
        assert!(parse_status("Dirty").is_err());
        assert!(parse_status("available").is_err());
    }
}
