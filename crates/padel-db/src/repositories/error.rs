//! Error handling utilities for repositories

use padel_core::error::DomainError;
use padel_core::value_objects::{MatchId, PlayerId, TeamId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: &UserId) -> DomainError {
    DomainError::UserNotFound(id.clone())
}

/// Create a "match not found" error
pub fn match_not_found(id: &MatchId) -> DomainError {
    DomainError::MatchNotFound(id.clone())
}

/// Create a "slot not found" error
pub fn player_not_found(id: &PlayerId) -> DomainError {
    DomainError::PlayerNotFound(id.clone())
}

/// Create a "team not found" error
pub fn team_not_found(id: &TeamId) -> DomainError {
    DomainError::TeamNotFound(id.clone())
}

/// Create an "invitation not found" error
pub fn invitation_not_found() -> DomainError {
    DomainError::InvitationNotFound
}
