//! HTTP client for the external pricing advisor
//!
//! The advisor is queried per quote with a short timeout of its own. Any
//! transport failure, non-2xx status or malformed payload is reported as
//! `AdvisorUnavailable`; the pricing engine absorbs that and falls back to
//! rule-based pricing.

use async_trait::async_trait;
use chrono::NaiveDate;
use hotel_core::models::AdvisorRecommendation;
use hotel_core::traits::PricingAdvisor;
use hotel_core::{AppError, AppResult};
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Advisor request payload
#[derive(Debug, Serialize)]
struct AdvisorRequest<'a> {
    /// ISO date of the stay being priced
    date: String,
    room_type: &'a str,
}

/// Pricing advisor reachable over HTTP
pub struct HttpPricingAdvisor {
    http_client: Client,
    base_url: String,
}

impl HttpPricingAdvisor {
    /// Create a new advisor client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Advisor service base URL (e.g. "http://localhost:8000")
    /// * `timeout_ms` - Request timeout in milliseconds, independent of any
    ///   room-lock timeout
    pub fn new(base_url: &str, timeout_ms: u64) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build advisor client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PricingAdvisor for HttpPricingAdvisor {
    #[instrument(skip(self))]
    async fn recommend(
        &self,
        room_type: &str,
        date: NaiveDate,
    ) -> AppResult<AdvisorRecommendation> {
        let url = format!("{}/recommend-pricing", self.base_url);
        let request = AdvisorRequest {
            date: date.format("%Y-%m-%d").to_string(),
            room_type,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Advisor request failed: {}", e);
                AppError::AdvisorUnavailable(e.to_string())
            })?;

        if !response.status().is_success() {
            warn!("Advisor returned status {}", response.status());
            return Err(AppError::AdvisorUnavailable(format!(
                "status {}",
                response.status()
            )));
        }

        // A payload that does not match the fixed result type is treated
        // exactly like a transport failure.
        let recommendation: AdvisorRecommendation = response.json().await.map_err(|e| {
            warn!("Advisor payload failed to deserialize: {}", e);
            AppError::AdvisorUnavailable(format!("bad payload: {}", e))
        })?;

        debug!(
            "Advisor recommended {} for {} on {}",
            recommendation.recommended_price, room_type, date
        );

        Ok(recommendation)
    }
}
