//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use padel_core::entities::{MatchFormat, MatchStatus, MatchType, TeamKey};
use serde::Serialize;

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

/// Individual dependency checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: bool,
}

impl ReadinessResponse {
    pub fn new(store: bool) -> Self {
        Self {
            status: if store { "ready" } else { "not_ready" }.to_string(),
            checks: HealthChecks { store },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.store
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// The signed-in user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub image: Option<String>,
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

/// Another player, as listed by search
#[derive(Debug, Serialize)]
pub struct PublicUserResponse {
    pub id: String,
    pub display_name: String,
    pub image: Option<String>,
    pub level: i32,
}

// ============================================================================
// Match Responses
// ============================================================================

/// Result of creating a match: the links to hand out
#[derive(Debug, Serialize)]
pub struct CreateMatchResponse {
    pub match_id: String,
    pub share_link: String,
    pub join_links: Vec<JoinLinkResponse>,
    pub invitation_links: Vec<InvitationLinkResponse>,
}

/// Direct link to claim an open slot
#[derive(Debug, Serialize)]
pub struct JoinLinkResponse {
    pub player_id: String,
    pub position: u8,
    pub team: TeamKey,
    pub display_name: String,
    pub link: String,
}

/// Link bound to an email invitation
#[derive(Debug, Serialize)]
pub struct InvitationLinkResponse {
    pub position: u8,
    pub email: String,
    pub link: String,
    pub expires_at: DateTime<Utc>,
}

/// Full match with slots, teams and what the viewer may do
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: String,
    pub creator_id: String,
    pub status: MatchStatus,
    pub sets: u8,
    pub match_type: MatchType,
    pub format: MatchFormat,
    pub counts_for_ranking: bool,
    pub club: Option<String>,
    pub court_number: Option<String>,
    pub notes: Option<String>,
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResponse>,
    pub teams: Vec<TeamResponse>,
    pub slots: Vec<SlotResponse>,
    pub share_link: String,
    pub viewer: ViewerResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact match entry for lists
#[derive(Debug, Serialize)]
pub struct MatchSummaryResponse {
    pub id: String,
    pub status: MatchStatus,
    pub match_type: MatchType,
    pub format: MatchFormat,
    pub club: Option<String>,
    pub score: Option<String>,
    pub share_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub key: TeamKey,
    pub label: String,
}

/// Occupancy of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// No account holds the slot
    Free,
    /// Held by an account that has not confirmed the result
    Claimed,
    /// Held by an account that confirmed the result
    Confirmed,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub position: u8,
    pub team: TeamKey,
    pub index_in_team: u8,
    pub display_name: String,
    pub user_id: Option<String>,
    pub state: SlotState,
    pub joined_at: Option<DateTime<Utc>>,
}

/// Parsed score with per-set winners
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub sets: Vec<SetResponse>,
    pub sets_won_a: usize,
    pub sets_won_b: usize,
    pub winner: Option<TeamKey>,
}

#[derive(Debug, Serialize)]
pub struct SetResponse {
    pub team_a: u16,
    pub team_b: u16,
    pub winner: Option<TeamKey>,
}

/// What the requesting user may do with a match
#[derive(Debug, Default, Serialize)]
pub struct ViewerResponse {
    pub is_creator: bool,
    pub is_participant: bool,
    pub viewer_confirmed: bool,
    pub can_submit_result: bool,
    pub can_confirm_result: bool,
}

// ============================================================================
// Slot Preview Responses
// ============================================================================

/// Why the viewer cannot join a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinBlockReason {
    SlotTaken,
    MatchClosed,
    AlreadyInMatch,
    NotSignedIn,
}

/// Join link preview
#[derive(Debug, Serialize)]
pub struct SlotPreviewResponse {
    pub slot: SlotResponse,
    pub team_label: String,
    #[serde(rename = "match")]
    pub match_summary: MatchSummaryResponse,
    pub can_join: bool,
    pub blocked_by: Option<JoinBlockReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness() {
        assert!(ReadinessResponse::new(true).is_ready());
        let not_ready = ReadinessResponse::new(false);
        assert_eq!(not_ready.status, "not_ready");
    }

    #[test]
    fn test_enums_serialize_snake_case() {
        assert_eq!(serde_json::to_value(SlotState::Confirmed).unwrap(), "confirmed");
        assert_eq!(
            serde_json::to_value(JoinBlockReason::NotSignedIn).unwrap(),
            "not_signed_in"
        );
    }
}
