//! Pricing DTOs

use chrono::{DateTime, NaiveDate, Utc};
use hotel_core::models::{PriceHistory, PriceQuote, PriceRule};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for a price quote
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteQuery {
    /// Room type name, e.g. "Suite"
    #[validate(length(min = 1, max = 100))]
    pub room_type: String,

    /// Target stay date
    pub date: NaiveDate,
}

/// Price quote response DTO
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub price: Decimal,
    pub reason: String,
    pub source: String,
    pub confidence: f32,
}

impl From<PriceQuote> for QuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            price: quote.price,
            reason: quote.reason,
            source: quote.source.to_string(),
            confidence: quote.confidence,
        }
    }
}

/// Price rule response DTO
#[derive(Debug, Serialize)]
pub struct PriceRuleResponse {
    pub id: i32,
    pub name: String,
    pub multiplier: Decimal,
    pub is_active: bool,
    pub category: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<PriceRule> for PriceRuleResponse {
    fn from(rule: PriceRule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            multiplier: rule.multiplier,
            is_active: rule.is_active,
            category: rule.category,
            start_date: rule.start_date,
            end_date: rule.end_date,
        }
    }
}

/// Price history response DTO
#[derive(Debug, Serialize)]
pub struct PriceHistoryResponse {
    pub id: i32,
    pub room_type: String,
    pub date: NaiveDate,
    pub price: Decimal,
    pub reason: String,
    pub source: String,
    pub confidence: f32,
    pub generated_at: DateTime<Utc>,
}

impl From<PriceHistory> for PriceHistoryResponse {
    fn from(entry: PriceHistory) -> Self {
        Self {
            id: entry.id,
            room_type: entry.room_type,
            date: entry.date,
            price: entry.price,
            reason: entry.reason,
            source: entry.source,
            confidence: entry.confidence,
            generated_at: entry.generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::models::PriceSource;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_response_source_string() {
        let response = QuoteResponse::from(PriceQuote {
            price: dec!(540.00),
            reason: "Standard Rate".to_string(),
            source: PriceSource::RulesAiDown,
            confidence: 1.0,
        });

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"source\":\"Rules (AI Down)\""));
        assert!(json.contains("\"price\":\"540.00\""));
    }
}
