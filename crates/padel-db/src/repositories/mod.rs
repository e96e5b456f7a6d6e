//! Repository implementations
//!
//! PostgreSQL implementation of the storage traits defined in padel-core.
//! Read-only queries run on a pooled connection; mutations run inside a
//! [`PgMatchTransaction`].

mod error;
mod queries;
mod store;
mod transaction;

pub use store::PgMatchStore;
pub use transaction::PgMatchTransaction;
