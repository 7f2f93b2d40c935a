//! Audit log handlers
//!
//! Query access to the audit trail, restricted to privileged actors.

use crate::dto::{ApiResponse, AuditLogListResponse, AuditLogQueryParams, AuditLogResponse};
use crate::extract::RequestActor;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use hotel_core::AppError;
use hotel_db::repositories::PgAuditLogRepository;
use sqlx::PgPool;
use tracing::debug;

/// List audit logs with filters (Admin/Manager only)
///
/// GET /api/v1/audit-logs
pub async fn list_audit_logs(
    pool: web::Data<PgPool>,
    actor: RequestActor,
    query: web::Query<AuditLogQueryParams>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_privileged() {
        return Err(AppError::Forbidden);
    }

    debug!("Listing audit logs");

    let repo = PgAuditLogRepository::new(pool.get_ref().clone());

    let page = query.page.max(1);
    let per_page = query.per_page.clamp(1, 100);
    let offset = (page - 1) * per_page;

    let start_date = parse_date(query.start_date.as_deref(), "start_date")?;
    let end_date = parse_date(query.end_date.as_deref(), "end_date")?;

    let total = repo
        .count_with_filters(
            query.action.as_deref(),
            query.entity_type.as_deref(),
            query.entity_id.as_deref(),
        )
        .await?;

    let logs = repo
        .find_with_filters(
            query.action.as_deref(),
            query.entity_type.as_deref(),
            query.entity_id.as_deref(),
            start_date,
            end_date,
            per_page,
            offset,
        )
        .await?;

    let total_pages = (total as f64 / per_page as f64).ceil() as i64;

    let response = AuditLogListResponse {
        logs: logs.into_iter().map(AuditLogResponse::from).collect(),
        total,
        page,
        per_page,
        total_pages,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

fn parse_date(value: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, AppError> {
    match value {
        Some(raw) => raw
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(|_| {
                AppError::InvalidInput(format!("Invalid {} format. Use ISO 8601.", field))
            }),
        None => Ok(None),
    }
}

/// Configure audit log routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/audit-logs").route("", web::get().to(list_audit_logs)));
}
