//! Audit log repository implementation
//!
//! Provides PostgreSQL-backed storage for the append-only audit trail.

use chrono::{DateTime, Utc};
use hotel_core::models::{AuditLog, AuditLogData};
use hotel_core::{AppError, AppResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, error, instrument};

fn map_audit(row: PgRow) -> AuditLog {
    AuditLog {
        id: row.get("id"),
        action: row.get("action"),
        performed_by: row.get("performed_by"),
        details: row.get("details"),
        timestamp: row.get("timestamp"),
        entity_type: row.get("entity_type"),
        entity_id: row.get("entity_id"),
    }
}

/// PostgreSQL implementation of the audit log repository
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new audit log repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new audit log entry
    #[instrument(skip(self, data))]
    pub async fn create(&self, data: AuditLogData) -> AppResult<AuditLog> {
        debug!("Creating audit log: {} on {}", data.action, data.entity_type);

        let row = sqlx::query(
            r#"
            INSERT INTO audit_logs (action, performed_by, details, entity_type, entity_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, action, performed_by, details, timestamp, entity_type, entity_id
            "#,
        )
        .bind(&data.action)
        .bind(&data.performed_by)
        .bind(&data.details)
        .bind(&data.entity_type)
        .bind(&data.entity_id)
        .map(map_audit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating audit log: {}", e);
            AppError::Database(format!("Failed to create audit log: {}", e))
        })?;

        Ok(row)
    }

    /// Find audit logs with filters and pagination
    #[instrument(skip(self))]
    pub async fn find_with_filters(
        &self,
        action: Option<&str>,
        entity_type: Option<&str>,
        entity_id: Option<&str>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<AuditLog>> {
        debug!("Finding audit logs with filters");

        let rows = sqlx::query(
            r#"
            SELECT id, action, performed_by, details, timestamp, entity_type, entity_id
            FROM audit_logs
            WHERE ($1::TEXT IS NULL OR action = $1)
              AND ($2::TEXT IS NULL OR entity_type = $2)
              AND ($3::TEXT IS NULL OR entity_id = $3)
              AND ($4::TIMESTAMPTZ IS NULL OR timestamp >= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR timestamp <= $5)
            ORDER BY timestamp DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(start_date)
        .bind(end_date)
        .bind(limit)
        .bind(offset)
        .map(map_audit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding audit logs: {}", e);
            AppError::Database(format!("Failed to fetch audit logs: {}", e))
        })?;

        Ok(rows)
    }

    /// Count audit logs with filters
    #[instrument(skip(self))]
    pub async fn count_with_filters(
        &self,
        action: Option<&str>,
        entity_type: Option<&str>,
        entity_id: Option<&str>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM audit_logs
            WHERE ($1::TEXT IS NULL OR action = $1)
              AND ($2::TEXT IS NULL OR entity_type = $2)
              AND ($3::TEXT IS NULL OR entity_id = $3)
            "#,
        )
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error counting audit logs: {}", e);
            AppError::Database(format!("Failed to count audit logs: {}", e))
        })?;

        Ok(count)
    }
}
