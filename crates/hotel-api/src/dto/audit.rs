//! Audit log DTOs

use chrono::{DateTime, Utc};
use hotel_core::models::AuditLog;
use serde::{Deserialize, Serialize};

/// Query parameters for listing audit logs
#[derive(Debug, Deserialize)]
pub struct AuditLogQueryParams {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    /// ISO 8601 lower bound on the entry timestamp
    pub start_date: Option<String>,
    /// ISO 8601 upper bound on the entry timestamp
    pub end_date: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    50
}

/// Audit log entry response DTO
#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub id: i64,
    pub action: String,
    pub performed_by: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
    pub entity_type: String,
    pub entity_id: Option<String>,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            action: log.action,
            performed_by: log.performed_by,
            details: log.details,
            timestamp: log.timestamp,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
        }
    }
}

/// Paginated audit log listing
#[derive(Debug, Serialize)]
pub struct AuditLogListResponse {
    pub logs: Vec<AuditLogResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}
