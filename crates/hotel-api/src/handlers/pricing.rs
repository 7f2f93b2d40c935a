//! Pricing handlers
//!
//! Quote endpoint backed by the pricing engine, plus read-only listings of
//! rules and the computation history.

use crate::dto::{ApiResponse, PriceHistoryResponse, PriceRuleResponse, QuoteQuery, QuoteResponse};
use crate::AppPricingEngine;
use actix_web::{web, HttpResponse};
use hotel_core::AppError;
use hotel_db::repositories::{PgPriceHistoryRepository, PgPriceRuleRepository};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, instrument};
use validator::Validate;

/// Quote a nightly price
///
/// GET /api/v1/pricing/quote?room_type=Suite&date=2025-07-15
#[instrument(skip(pricing))]
pub async fn get_quote(
    pricing: web::Data<AppPricingEngine>,
    query: web::Query<QuoteQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    debug!("Quoting {} for {}", query.room_type, query.date);

    let quote = pricing.quote(&query.room_type, query.date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(QuoteResponse::from(quote))))
}

/// List all price rules
///
/// GET /api/v1/pricing/rules
#[instrument(skip(pool))]
pub async fn list_rules(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let rules = PgPriceRuleRepository::new(pool.get_ref().clone())
        .list()
        .await?;
    let response: Vec<PriceRuleResponse> = rules.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Query parameters for the history listing
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    50
}

/// List recent pricing computations
///
/// GET /api/v1/pricing/history
#[instrument(skip(pool))]
pub async fn list_history(
    pool: web::Data<PgPool>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.clamp(1, 500);
    let history = PgPriceHistoryRepository::new(pool.get_ref().clone())
        .list_recent(limit)
        .await?;
    let response: Vec<PriceHistoryResponse> = history.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure pricing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pricing")
            .route("/quote", web::get().to(get_quote))
            .route("/rules", web::get().to(list_rules))
            .route("/history", web::get().to(list_history)),
    );
}
