//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub advisor: AdvisorConfig,
    pub booking: BookingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

/// Pricing advisor configuration
///
/// The advisor timeout is deliberately independent of the room-lock timeout:
/// a slow advisor must never extend a room's critical section. The pricing
/// engine does not hold any room lock while calling the advisor.
#[derive(Debug, Deserialize, Clone)]
pub struct AdvisorConfig {
    /// Base URL of the pricing advisor service
    #[serde(default = "default_advisor_url")]
    pub url: String,

    /// Request timeout for advisor calls in milliseconds
    #[serde(default = "default_advisor_timeout")]
    pub timeout_ms: u64,
}

fn default_advisor_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_advisor_timeout() -> u64 {
    1500
}

/// Booking-specific configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Per-room lock acquisition timeout in seconds
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_secs: u64,

    /// Window before check-in inside which only privileged actors may cancel
    #[serde(default = "default_cancellation_window")]
    pub cancellation_window_hours: i64,
}

fn default_lock_timeout() -> u64 {
    2
}

fn default_cancellation_window() -> i64 {
    24
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("advisor.url", "http://localhost:8000")?
            .set_default("advisor.timeout_ms", 1500)?
            .set_default("booking.lock_timeout_secs", 2)?
            .set_default("booking.cancellation_window_hours", 24)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with HOTEL_ prefix
            .add_source(
                Environment::with_prefix("HOTEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            lock_timeout_secs: 2,
            cancellation_window_hours: 24,
        }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            url: default_advisor_url(),
            timeout_ms: default_advisor_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_booking_config() {
        let config = BookingConfig::default();
        assert_eq!(config.lock_timeout_secs, 2);
        assert_eq!(config.cancellation_window_hours, 24);
    }

    #[test]
    fn test_default_advisor_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.timeout_ms, 1500);
    }
}
