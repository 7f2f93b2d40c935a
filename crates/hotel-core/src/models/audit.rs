//! Audit log model
//!
//! Append-only record of booking mutations and other tracked actions. The
//! audit sink is an external collaborator: the core invokes it after commit
//! and treats failures as non-fatal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    /// Unique identifier
    pub id: i64,

    /// Action performed, e.g. "BOOKING_CREATE"
    pub action: String,

    /// Username or identity of the acting agent
    pub performed_by: String,

    /// Free-text description of what happened
    pub details: String,

    /// When the action happened
    pub timestamp: DateTime<Utc>,

    /// Entity type affected, e.g. "Booking"
    pub entity_type: String,

    /// Affected entity id; absent for actions not tied to one entity
    pub entity_id: Option<String>,
}

impl AuditLog {
    /// Create a new audit entry builder
    pub fn builder() -> AuditLogBuilder {
        AuditLogBuilder::default()
    }
}

/// Builder for audit entries
#[derive(Debug, Default)]
pub struct AuditLogBuilder {
    action: Option<String>,
    performed_by: Option<String>,
    details: Option<String>,
    entity_type: Option<String>,
    entity_id: Option<String>,
}

impl AuditLogBuilder {
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn performed_by(mut self, performed_by: impl Into<String>) -> Self {
        self.performed_by = Some(performed_by.into());
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Build the entry data for insertion
    pub fn build(self) -> Result<AuditLogData, &'static str> {
        Ok(AuditLogData {
            action: self.action.ok_or("action is required")?,
            performed_by: self.performed_by.ok_or("performed_by is required")?,
            details: self.details.unwrap_or_default(),
            entity_type: self.entity_type.ok_or("entity_type is required")?,
            entity_id: self.entity_id,
        })
    }
}

/// Data for creating an audit log entry
#[derive(Debug, Clone)]
pub struct AuditLogData {
    pub action: String,
    pub performed_by: String,
    pub details: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
}

impl AuditLogData {
    /// Insert this audit entry into the database
    ///
    /// Convenience for services to record actions after commit. Swallows
    /// errors so a failed audit write never undoes a committed mutation.
    pub async fn insert(self, pool: &sqlx::PgPool) {
        use tracing::warn;

        let result = sqlx::query(
            r#"
            INSERT INTO audit_logs (action, performed_by, details, entity_type, entity_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&self.action)
        .bind(&self.performed_by)
        .bind(&self.details)
        .bind(&self.entity_type)
        .bind(&self.entity_id)
        .execute(pool)
        .await;

        if let Err(e) = result {
            warn!("Failed to insert audit log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_action() {
        let result = AuditLog::builder()
            .performed_by("reception")
            .entity_type("Booking")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_full() {
        let data = AuditLog::builder()
            .action("BOOKING_CREATE")
            .performed_by("reception")
            .details("New booking created for Room 202")
            .entity_type("Booking")
            .entity_id("17")
            .build()
            .unwrap();

        assert_eq!(data.action, "BOOKING_CREATE");
        assert_eq!(data.entity_id.as_deref(), Some("17"));
    }

    #[test]
    fn test_entity_id_is_optional() {
        let data = AuditLog::builder()
            .action("PRICE_RULE_SWEEP")
            .performed_by("system")
            .entity_type("PriceRule")
            .build()
            .unwrap();
        assert!(data.entity_id.is_none());

        // Entries written without an entity id must read back as None.
        let entry = AuditLog {
            id: 1,
            action: data.action,
            performed_by: data.performed_by,
            details: data.details,
            timestamp: Utc::now(),
            entity_type: data.entity_type,
            entity_id: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["entity_id"].is_null());
    }
}
