//! Hotel Backend Database Layer
//!
//! This crate provides PostgreSQL database access and repository
//! implementations for the hotel backend. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for all domain entities
//! - The transactional overlap check guarding the no-double-booking invariant
//! - Transaction support for atomic booking mutations

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use hotel_core::{AppError, AppResult};
pub use sqlx::{PgPool, Postgres, Transaction};
