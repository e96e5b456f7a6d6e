//! # padel-core
//!
//! Domain layer containing entities, value objects, the match lifecycle rules,
//! and the storage traits (ports) the rest of the workspace is built on.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod lifecycle;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Invitation, Match, MatchDetails, MatchFormat, MatchPlayer, MatchStatus, MatchType, Principal,
    Team, TeamKey, User,
};
pub use error::DomainError;
pub use lifecycle::{ConfirmationPolicy, ConfirmationTally, JoinBlocker, ViewerCapabilities};
pub use traits::{MatchStore, MatchTransaction, PlayerFilter, RepoResult};
pub use value_objects::{
    generate_token, InvitationId, LinkBuilder, LinkResource, MatchId, PlayerId, Score,
    ScoreParseError, SetScore, TeamId, UserId,
};
