//! In-memory match store
//!
//! Keeps every table in process behind a single async mutex. A transaction
//! holds the lock for its whole lifetime and works on a private copy of the
//! state that replaces the shared one on commit, so transactions are fully
//! serialized and a dropped or rolled back transaction leaves no trace.

mod state;
mod store;

pub use store::{MemoryMatchStore, MemoryTransaction};
