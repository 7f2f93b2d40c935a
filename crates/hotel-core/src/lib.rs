//! Hotel Backend Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the hotel reservation backend. It includes:
//!
//! - Domain models (Room, Booking, PriceRule, StaffTask, etc.)
//! - Common traits for repositories and external collaborators
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
