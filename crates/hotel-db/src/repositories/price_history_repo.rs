//! Price history repository
//!
//! Append-only: one row per pricing computation, never mutated.

use async_trait::async_trait;
use hotel_core::models::{NewPriceHistory, PriceHistory};
use hotel_core::traits::PriceHistoryRepository;
use hotel_core::{AppError, AppResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{error, instrument};

fn map_history(row: PgRow) -> PriceHistory {
    PriceHistory {
        id: row.get("id"),
        room_type: row.get("room_type"),
        date: row.get("date"),
        price: row.get("price"),
        reason: row.get("reason"),
        source: row.get("source"),
        confidence: row.get("confidence"),
        generated_at: row.get("generated_at"),
    }
}

/// PostgreSQL price history repository
pub struct PgPriceHistoryRepository {
    pool: PgPool,
}

impl PgPriceHistoryRepository {
    /// Create a new price history repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent quotes, for dashboards
    #[instrument(skip(self))]
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<PriceHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_type, date, price, reason, source, confidence, generated_at
            FROM price_history
            ORDER BY generated_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .map(map_history)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list price history: {}", e)))?;

        Ok(rows)
    }
}

#[async_trait]
impl PriceHistoryRepository for PgPriceHistoryRepository {
    #[instrument(skip(self, entry))]
    async fn append(&self, entry: &NewPriceHistory) -> AppResult<PriceHistory> {
        let row = sqlx::query(
            r#"
            INSERT INTO price_history (room_type, date, price, reason, source, confidence)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, room_type, date, price, reason, source, confidence, generated_at
            "#,
        )
        .bind(&entry.room_type)
        .bind(entry.date)
        .bind(entry.price)
        .bind(&entry.reason)
        .bind(&entry.source)
        .bind(entry.confidence)
        .map(map_history)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to append price history: {}", e);
            AppError::Database(format!("Failed to append price history: {}", e))
        })?;

        Ok(row)
    }
}
