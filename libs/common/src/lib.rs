//! Common library for the recipe service
//!
//! This crate provides shared infrastructure used by the services in this
//! workspace: PostgreSQL connectivity and the storage error type.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     pool.close().await;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
