//! Price rule repository
//!
//! Rules are administered elsewhere; the engine only needs the active set
//! for a given date.

use async_trait::async_trait;
use chrono::NaiveDate;
use hotel_core::models::PriceRule;
use hotel_core::traits::PriceRuleRepository;
use hotel_core::{AppError, AppResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

fn map_rule(row: PgRow) -> PriceRule {
    PriceRule {
        id: row.get("id"),
        name: row.get("name"),
        multiplier: row.get("multiplier"),
        is_active: row.get("is_active"),
        category: row.get("category"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        created_at: row.get("created_at"),
    }
}

/// PostgreSQL price rule repository
pub struct PgPriceRuleRepository {
    pool: PgPool,
}

impl PgPriceRuleRepository {
    /// Create a new price rule repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all rules for administration views
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<PriceRule>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, multiplier, is_active, category, start_date, end_date, created_at
            FROM price_rules
            ORDER BY created_at DESC
            "#,
        )
        .map(map_rule)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list price rules: {}", e)))?;

        Ok(rows)
    }
}

#[async_trait]
impl PriceRuleRepository for PgPriceRuleRepository {
    #[instrument(skip(self))]
    async fn find_active_for_date(&self, date: NaiveDate) -> AppResult<Vec<PriceRule>> {
        debug!("Loading active price rules for {}", date);

        let rows = sqlx::query(
            r#"
            SELECT id, name, multiplier, is_active, category, start_date, end_date, created_at
            FROM price_rules
            WHERE is_active = TRUE
              AND (start_date IS NULL OR start_date <= $1)
              AND (end_date IS NULL OR end_date >= $1)
            "#,
        )
        .bind(date)
        .map(map_rule)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to load active price rules: {}", e)))?;

        Ok(rows)
    }
}
