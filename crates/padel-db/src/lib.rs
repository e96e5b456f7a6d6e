//! # padel-db
//!
//! Storage layer implementing the match store traits.
//!
//! ## Overview
//!
//! - [`PgMatchStore`]: PostgreSQL via SQLx. Each transaction wraps a
//!   `sqlx::Transaction` and locks the match row it touches, so concurrent
//!   confirmations on one match are serialized by the database.
//! - [`MemoryMatchStore`]: in-process store with serialized transactions,
//!   used by tests and for running without a database.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use padel_db::pool::{apply_schema, create_pool, DatabaseConfig};
//! use padel_db::PgMatchStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("postgresql://localhost:5432/padel");
//!     let pool = create_pool(&config).await?;
//!     apply_schema(&pool).await?;
//!     let store = PgMatchStore::new(pool);
//!
//!     // Hand the store to the service layer...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryMatchStore;
pub use pool::{apply_schema, create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgMatchStore, PgMatchTransaction};
