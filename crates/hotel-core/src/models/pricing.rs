//! Pricing models
//!
//! Price rules are owned by pricing administration and read-only to the
//! engine. Price history is an append-only audit trail of every quote
//! computed, including fallback quotes produced while the advisor was down.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active pricing rule with an optional validity window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRule {
    /// Unique identifier
    pub id: i32,

    /// Human-readable rule name, e.g. "Summer Peak"
    pub name: String,

    /// Positive multiplier applied to the base price (1.2 = +20%)
    pub multiplier: Decimal,

    /// Inactive rules are ignored by the engine
    pub is_active: bool,

    /// Rule category: Seasonal, Dynamic, Strategic, Event
    pub category: String,

    /// Window start, inclusive; open-ended when absent
    pub start_date: Option<NaiveDate>,

    /// Window end, inclusive; open-ended when absent
    pub end_date: Option<NaiveDate>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl PriceRule {
    /// Whether this rule applies on `date` (active and inside the window)
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(start) = self.start_date {
            if start > date {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if end < date {
                return false;
            }
        }
        true
    }
}

/// Where a quoted price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Advisor recommendation replaced the rule multipliers
    Ai,
    /// Advisor was unreachable; rules used as fallback
    RulesAiDown,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::Ai => write!(f, "AI"),
            PriceSource::RulesAiDown => write!(f, "Rules (AI Down)"),
        }
    }
}

/// Result of a pricing computation
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    /// Final price, rounded to 2 decimals, never negative
    pub price: Decimal,

    /// Human-readable justification
    pub reason: String,

    /// Which path produced the price
    pub source: PriceSource,

    /// Advisor confidence, 1.0 for rule-based quotes
    pub confidence: f32,
}

/// Immutable record of one pricing computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Unique identifier
    pub id: i32,

    /// Room type the price was quoted for
    pub room_type: String,

    /// Target stay date
    pub date: NaiveDate,

    /// Quoted price
    pub price: Decimal,

    /// Justification recorded at quote time
    pub reason: String,

    /// "AI" or "Rules (AI Down)"
    pub source: String,

    /// Advisor confidence at quote time
    pub confidence: f32,

    /// When the quote was computed
    pub generated_at: DateTime<Utc>,
}

/// Data for appending a price history record
#[derive(Debug, Clone)]
pub struct NewPriceHistory {
    pub room_type: String,
    pub date: NaiveDate,
    pub price: Decimal,
    pub reason: String,
    pub source: String,
    pub confidence: f32,
}

/// Typed advisor response
///
/// The advisor wire format is fixed; anything that fails to deserialize into
/// this struct is treated exactly like a transport failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorRecommendation {
    /// Absolute price the advisor recommends for the room type and date
    #[serde(alias = "recommended_price")]
    pub recommended_price: Decimal,

    /// Advisor-supplied justification
    pub reason: String,

    /// Advisor confidence in [0,1]
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rule(active: bool, start: Option<&str>, end: Option<&str>) -> PriceRule {
        PriceRule {
            id: 1,
            name: "Summer".to_string(),
            multiplier: dec!(1.2),
            is_active: active,
            category: "Seasonal".to_string(),
            start_date: start.map(|s| s.parse().unwrap()),
            end_date: end.map(|s| s.parse().unwrap()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rule_applies_open_window() {
        let r = rule(true, None, None);
        assert!(r.applies_on("2025-07-01".parse().unwrap()));
    }

    #[test]
    fn test_rule_window_bounds_inclusive() {
        let r = rule(true, Some("2025-06-01"), Some("2025-08-31"));
        assert!(r.applies_on("2025-06-01".parse().unwrap()));
        assert!(r.applies_on("2025-08-31".parse().unwrap()));
        assert!(!r.applies_on("2025-05-31".parse().unwrap()));
        assert!(!r.applies_on("2025-09-01".parse().unwrap()));
    }

    #[test]
    fn test_inactive_rule_never_applies() {
        let r = rule(false, None, None);
        assert!(!r.applies_on("2025-07-01".parse().unwrap()));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(PriceSource::Ai.to_string(), "AI");
        assert_eq!(PriceSource::RulesAiDown.to_string(), "Rules (AI Down)");
    }

    #[test]
    fn test_advisor_payload_camel_case() {
        let rec: AdvisorRecommendation = serde_json::from_str(
            r#"{"recommendedPrice": 200, "reason": "High Demand", "confidence": 0.9}"#,
        )
        .unwrap();
        assert_eq!(rec.recommended_price, dec!(200));
        assert_eq!(rec.reason, "High Demand");
    }

    #[test]
    fn test_advisor_payload_snake_case_alias() {
        let rec: AdvisorRecommendation = serde_json::from_str(
            r#"{"recommended_price": 123.45, "reason": "ok", "confidence": 0.5}"#,
        )
        .unwrap();
        assert_eq!(rec.recommended_price, dec!(123.45));
    }
}
