//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{MatchId, PlayerId, ScoreParseError, TeamId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Slot not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("Invitation not found")]
    InvitationNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid score: {0}")]
    InvalidScore(#[from] ScoreParseError),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You cannot update a match you are not part of.")]
    NotParticipant,

    #[error("Only the match creator can do this.")]
    NotMatchCreator,

    #[error("You must occupy position 0 of Team A.")]
    CreatorMustOccupyAnchorSlot,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("This slot is already taken.")]
    SlotOccupied,

    #[error("You already occupy another slot in this match.")]
    AlreadyInMatch,

    #[error("This slot is claimed by a player and cannot be renamed.")]
    SlotClaimed,

    #[error("Team does not belong to this match")]
    TeamNotInMatch,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("This match is closed to new players.")]
    MatchClosed,

    #[error("There is no result to confirm yet.")]
    MissingScore,

    #[error("Invitation has already been accepted")]
    InvitationAlreadyAccepted,

    #[error("Invitation has expired")]
    InvitationExpired,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MatchNotFound(_) => "UNKNOWN_MATCH",
            Self::PlayerNotFound(_) => "UNKNOWN_SLOT",
            Self::TeamNotFound(_) => "UNKNOWN_TEAM",
            Self::InvitationNotFound => "UNKNOWN_INVITATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidScore(_) => "INVALID_SCORE",

            // Authorization
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::NotMatchCreator => "NOT_MATCH_CREATOR",
            Self::CreatorMustOccupyAnchorSlot => "CREATOR_NOT_IN_ANCHOR_SLOT",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::SlotOccupied => "SLOT_OCCUPIED",
            Self::AlreadyInMatch => "ALREADY_IN_MATCH",
            Self::SlotClaimed => "SLOT_CLAIMED",
            Self::TeamNotInMatch => "TEAM_NOT_IN_MATCH",

            // Business Rules
            Self::MatchClosed => "MATCH_CLOSED",
            Self::MissingScore => "MISSING_SCORE",
            Self::InvitationAlreadyAccepted => "INVITATION_ALREADY_ACCEPTED",
            Self::InvitationExpired => "INVITATION_EXPIRED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::MatchNotFound(_)
                | Self::PlayerNotFound(_)
                | Self::TeamNotFound(_)
                | Self::InvitationNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidScore(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotParticipant | Self::NotMatchCreator | Self::CreatorMustOccupyAnchorSlot
        )
    }

    /// Check if this is a conflict error, including rejected state transitions
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::SlotOccupied
                | Self::AlreadyInMatch
                | Self::SlotClaimed
                | Self::TeamNotInMatch
                | Self::MatchClosed
                | Self::MissingScore
                | Self::InvitationAlreadyAccepted
                | Self::InvitationExpired
        )
    }

    /// Check if this wraps an infrastructure failure
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }

    /// HTTP status for the error's category
    pub fn http_status(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::MatchNotFound(MatchId::new("m1"));
        assert_eq!(err.code(), "UNKNOWN_MATCH");

        let err = DomainError::CreatorMustOccupyAnchorSlot;
        assert_eq!(err.code(), "CREATOR_NOT_IN_ANCHOR_SLOT");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::PlayerNotFound(PlayerId::new("p")).is_not_found());
        assert!(DomainError::InvitationNotFound.is_not_found());
        assert!(!DomainError::SlotOccupied.is_not_found());
    }

    #[test]
    fn test_is_authorization() {
        assert!(DomainError::NotParticipant.is_authorization());
        assert!(DomainError::NotMatchCreator.is_authorization());
        assert!(!DomainError::MissingScore.is_authorization());
    }

    #[test]
    fn test_state_errors_are_conflicts() {
        assert!(DomainError::MatchClosed.is_conflict());
        assert!(DomainError::MissingScore.is_conflict());
        assert!(DomainError::InvitationExpired.is_conflict());
        assert!(DomainError::DatabaseError("boom".into()).is_infrastructure());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(DomainError::TeamNotFound(TeamId::new("t")).http_status(), 404);
        assert_eq!(DomainError::CreatorMustOccupyAnchorSlot.http_status(), 403);
        assert_eq!(DomainError::ValidationError("x".into()).http_status(), 400);
        assert_eq!(DomainError::SlotClaimed.http_status(), 409);
        assert_eq!(DomainError::InternalError("x".into()).http_status(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::NotParticipant;
        assert_eq!(err.to_string(), "You cannot update a match you are not part of.");

        let err = DomainError::from(ScoreParseError::Empty);
        assert_eq!(err.to_string(), "Invalid score: score is empty");
        assert!(err.is_validation());
    }
}
