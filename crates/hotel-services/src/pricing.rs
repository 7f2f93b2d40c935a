//! Dynamic pricing engine
//!
//! Composes a nightly price from three inputs: the room type's base price,
//! the product of active rule multipliers for the date, and an optional
//! advisor recommendation. When the advisor answers, its recommendation
//! fully replaces the rule multipliers; when it is unreachable the rules
//! stand alone and the quote is flagged as a fallback. Every computation is
//! appended to the price history, fallbacks included.

use chrono::NaiveDate;
use hotel_core::models::{NewPriceHistory, PriceQuote, PriceSource};
use hotel_core::traits::{PriceHistoryRepository, PriceRuleRepository, PricingAdvisor};
use hotel_core::AppResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::constants::DEFAULT_BASE_PRICE;

/// Nightly base price for a room type, matched by name
pub fn base_price_for(room_type: &str) -> Decimal {
    // Checked in this order so "Presidential Suite" prices as presidential,
    // not as a plain suite.
    if room_type.contains("Presidential") {
        dec!(1200.0)
    } else if room_type.contains("Royal") {
        dec!(1500.0)
    } else if room_type.contains("Suite") {
        dec!(450.0)
    } else if room_type.contains("View") {
        dec!(350.0)
    } else {
        DEFAULT_BASE_PRICE
    }
}

/// Pricing engine generic over its rule store, history store and advisor
pub struct PricingEngine<R, H, A>
where
    R: PriceRuleRepository,
    H: PriceHistoryRepository,
    A: PricingAdvisor,
{
    rules: Arc<R>,
    history: Arc<H>,
    advisor: Arc<A>,
}

impl<R, H, A> PricingEngine<R, H, A>
where
    R: PriceRuleRepository,
    H: PriceHistoryRepository,
    A: PricingAdvisor,
{
    pub fn new(rules: Arc<R>, history: Arc<H>, advisor: Arc<A>) -> Self {
        Self {
            rules,
            history,
            advisor,
        }
    }

    /// Quote a nightly price for a room type on a date
    ///
    /// Rule lookup and history persistence errors surface to the caller;
    /// advisor unavailability does not.
    #[instrument(skip(self))]
    pub async fn quote(&self, room_type: &str, date: NaiveDate) -> AppResult<PriceQuote> {
        let base = base_price_for(room_type);

        // Product of every applicable rule multiplier. A failed lookup is a
        // storage problem, not an advisor problem, so it surfaces.
        let rules_multiplier: Decimal = self
            .rules
            .find_active_for_date(date)
            .await?
            .iter()
            .filter(|r| r.applies_on(date))
            .map(|r| r.multiplier)
            .product();

        let quote = match self.advisor.recommend(room_type, date).await {
            Ok(recommendation) => {
                // The advisor speaks in absolute prices; convert back to a
                // multiplier over the base so one formula serves both paths.
                // The recommendation replaces the rule product entirely.
                let multiplier = if base > Decimal::ZERO {
                    recommendation.recommended_price / base
                } else {
                    dec!(100.0)
                };
                debug!(
                    "Advisor override for {}: multiplier {} replaces rules {}",
                    room_type, multiplier, rules_multiplier
                );
                PriceQuote {
                    price: clamp_price(base * multiplier),
                    reason: recommendation.reason,
                    source: PriceSource::Ai,
                    confidence: recommendation.confidence,
                }
            }
            Err(e) => {
                warn!("Advisor unavailable, falling back to rules: {}", e);
                PriceQuote {
                    price: clamp_price(base * rules_multiplier),
                    reason: "Standard Rate".to_string(),
                    source: PriceSource::RulesAiDown,
                    confidence: 1.0,
                }
            }
        };

        // Every computation is recorded, fallbacks included.
        self.history
            .append(&NewPriceHistory {
                room_type: room_type.to_string(),
                date,
                price: quote.price,
                reason: quote.reason.clone(),
                source: quote.source.to_string(),
                confidence: quote.confidence,
            })
            .await?;

        Ok(quote)
    }
}

/// Round to cents and clamp below at zero
fn clamp_price(raw: Decimal) -> Decimal {
    raw.round_dp(2).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use hotel_core::models::{AdvisorRecommendation, PriceHistory, PriceRule};
    use hotel_core::AppError;
    use parking_lot::Mutex;

    struct MockRules {
        rules: Vec<PriceRule>,
        fail: bool,
    }

    #[async_trait]
    impl PriceRuleRepository for MockRules {
        async fn find_active_for_date(
            &self,
            _date: NaiveDate,
        ) -> Result<Vec<PriceRule>, AppError> {
            if self.fail {
                return Err(AppError::Database("rules down".to_string()));
            }
            Ok(self.rules.clone())
        }
    }

    #[derive(Default)]
    struct MockHistory {
        appended: Mutex<Vec<NewPriceHistory>>,
    }

    #[async_trait]
    impl PriceHistoryRepository for MockHistory {
        async fn append(&self, entry: &NewPriceHistory) -> Result<PriceHistory, AppError> {
            self.appended.lock().push(entry.clone());
            Ok(PriceHistory {
                id: 1,
                room_type: entry.room_type.clone(),
                date: entry.date,
                price: entry.price,
                reason: entry.reason.clone(),
                source: entry.source.clone(),
                confidence: entry.confidence,
                generated_at: Utc::now(),
            })
        }
    }

    enum MockAdvisor {
        Up(Decimal, &'static str, f32),
        Down,
    }

    #[async_trait]
    impl PricingAdvisor for MockAdvisor {
        async fn recommend(
            &self,
            _room_type: &str,
            _date: NaiveDate,
        ) -> Result<AdvisorRecommendation, AppError> {
            match self {
                MockAdvisor::Up(price, reason, confidence) => Ok(AdvisorRecommendation {
                    recommended_price: *price,
                    reason: reason.to_string(),
                    confidence: *confidence,
                }),
                MockAdvisor::Down => {
                    Err(AppError::AdvisorUnavailable("connection refused".to_string()))
                }
            }
        }
    }

    fn rule(multiplier: Decimal) -> PriceRule {
        PriceRule {
            id: 1,
            name: "Summer Peak".to_string(),
            multiplier,
            is_active: true,
            category: "Seasonal".to_string(),
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }

    fn engine(
        rules: Vec<PriceRule>,
        advisor: MockAdvisor,
    ) -> (
        PricingEngine<MockRules, MockHistory, MockAdvisor>,
        Arc<MockHistory>,
    ) {
        let history = Arc::new(MockHistory::default());
        let engine = PricingEngine::new(
            Arc::new(MockRules { rules, fail: false }),
            history.clone(),
            Arc::new(advisor),
        );
        (engine, history)
    }

    fn day() -> NaiveDate {
        "2025-07-15".parse().unwrap()
    }

    #[test]
    fn test_base_price_tiers() {
        assert_eq!(base_price_for("Presidential Suite"), dec!(1200.0));
        assert_eq!(base_price_for("Royal Penthouse"), dec!(1500.0));
        assert_eq!(base_price_for("Junior Suite"), dec!(450.0));
        assert_eq!(base_price_for("Ocean View"), dec!(350.0));
        assert_eq!(base_price_for("Standard"), dec!(100.0));
    }

    #[tokio::test]
    async fn test_fallback_uses_rules_when_advisor_down() {
        let (engine, history) = engine(vec![rule(dec!(1.2))], MockAdvisor::Down);

        let quote = engine.quote("Junior Suite", day()).await.unwrap();

        assert_eq!(quote.price, dec!(540.00));
        assert_eq!(quote.source, PriceSource::RulesAiDown);
        assert_eq!(quote.reason, "Standard Rate");
        assert_eq!(quote.confidence, 1.0);

        let appended = history.appended.lock();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].source, "Rules (AI Down)");
    }

    #[tokio::test]
    async fn test_advisor_recommendation_replaces_rules() {
        // Rules would make it 540; the advisor's absolute 200 wins outright.
        let (engine, history) = engine(
            vec![rule(dec!(1.2))],
            MockAdvisor::Up(dec!(200), "High Demand", 0.9),
        );

        let quote = engine.quote("Junior Suite", day()).await.unwrap();

        assert_eq!(quote.price, dec!(200.00));
        assert_eq!(quote.source, PriceSource::Ai);
        assert_eq!(quote.reason, "High Demand");
        assert_eq!(quote.confidence, 0.9);

        let appended = history.appended.lock();
        assert_eq!(appended[0].source, "AI");
    }

    #[tokio::test]
    async fn test_multiple_rules_compound() {
        let (engine, _) = engine(
            vec![rule(dec!(1.2)), rule(dec!(1.5))],
            MockAdvisor::Down,
        );

        let quote = engine.quote("Standard", day()).await.unwrap();

        // 100 * 1.2 * 1.5
        assert_eq!(quote.price, dec!(180.00));
    }

    #[tokio::test]
    async fn test_no_rules_advisor_down_yields_base() {
        let (engine, _) = engine(vec![], MockAdvisor::Down);

        let quote = engine.quote("Ocean View", day()).await.unwrap();

        assert_eq!(quote.price, dec!(350.00));
        assert_eq!(quote.source, PriceSource::RulesAiDown);
    }

    #[tokio::test]
    async fn test_rule_lookup_failure_surfaces() {
        let history = Arc::new(MockHistory::default());
        let engine = PricingEngine::new(
            Arc::new(MockRules {
                rules: vec![],
                fail: true,
            }),
            history.clone(),
            Arc::new(MockAdvisor::Down),
        );

        let result = engine.quote("Standard", day()).await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert!(history.appended.lock().is_empty());
    }

    #[tokio::test]
    async fn test_negative_recommendation_clamps_to_zero() {
        let (engine, _) = engine(vec![], MockAdvisor::Up(dec!(-50), "glitch", 0.1));

        let quote = engine.quote("Standard", day()).await.unwrap();

        assert_eq!(quote.price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_quote_rounds_to_cents() {
        let (engine, _) = engine(vec![rule(dec!(1.333))], MockAdvisor::Down);

        let quote = engine.quote("Standard", day()).await.unwrap();

        assert_eq!(quote.price, dec!(133.30));
    }
}
