//! Storage traits (ports)

mod store;

pub use store::{MatchStore, MatchTransaction, PlayerFilter, RepoResult};
