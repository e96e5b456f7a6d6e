//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Rules that depend on the match format (slot count, positions) are checked
//! by the services.

use padel_core::entities::{MatchFormat, MatchType};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Match Requests
// ============================================================================

/// Create match request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(range(min = 1, max = 5, message = "Sets must be between 1 and 5"))]
    pub sets: u8,

    #[serde(default)]
    pub match_type: MatchType,

    #[serde(default)]
    pub counts_for_ranking: bool,

    #[serde(default)]
    pub format: MatchFormat,

    #[serde(default)]
    pub team_labels: TeamLabels,

    #[validate(length(max = 100, message = "Club must be at most 100 characters"))]
    pub club: Option<String>,

    #[validate(length(max = 20, message = "Court number must be at most 20 characters"))]
    pub court_number: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,

    /// Initial result, e.g. "6-4, 3-6, 6-2"
    #[validate(length(max = 100, message = "Score must be at most 100 characters"))]
    pub score: Option<String>,

    #[validate(length(min = 2, max = 4, message = "A match has 2 or 4 slots"))]
    pub slots: Vec<SlotRequest>,
}

/// Optional labels for both sides; blank means the default label
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamLabels {
    pub a: Option<String>,
    pub b: Option<String>,
}

/// One slot of a match being created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub position: u8,

    #[serde(flatten)]
    pub occupant: SlotOccupant,
}

/// Who fills a slot at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotOccupant {
    /// An existing account
    User { user_id: String },
    /// A name without an account
    Placeholder { display_name: String },
    /// An email invitation; `token` is generated when absent
    Invite {
        email: String,
        display_name: Option<String>,
        token: Option<String>,
    },
}

/// Partial update of the descriptive fields of a match.
/// Absent fields are left untouched; blank strings clear the field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMatchRequest {
    #[validate(length(max = 100, message = "Club must be at most 100 characters"))]
    pub club: Option<String>,

    #[validate(length(max = 20, message = "Court number must be at most 20 characters"))]
    pub court_number: Option<String>,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Result Requests
// ============================================================================

/// Submit result request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitResultRequest {
    #[validate(length(min = 1, max = 100, message = "Score must be 1-100 characters"))]
    pub score: String,

    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Slot and Team Requests
// ============================================================================

/// Rename an unclaimed slot
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameSlotRequest {
    #[validate(length(min = 1, max = 40, message = "Name must be 1-40 characters"))]
    pub display_name: String,
}

/// Release a slot, optionally naming the placeholder left behind
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReleaseSlotRequest {
    #[validate(length(max = 40, message = "Name must be at most 40 characters"))]
    pub display_name: Option<String>,
}

/// Rename a team
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameTeamRequest {
    #[validate(length(max = 100, message = "Label must be at most 100 characters"))]
    pub label: String,
}

// ============================================================================
// Invitation Requests
// ============================================================================

/// Accept an email invitation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AcceptInvitationRequest {
    #[validate(length(min = 1, max = 64, message = "Token must be 1-64 characters"))]
    pub token: String,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query for the viewer's match list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub limit: Option<i64>,
}

/// Query for player search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPlayersQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_json(sets: u8) -> serde_json::Value {
        serde_json::json!({
            "sets": sets,
            "match_type": "LOCAL_TOURNAMENT",
            "format": "SINGLES",
            "slots": [
                { "position": 0, "kind": "user", "user_id": "u1" },
                { "position": 1, "kind": "invite", "email": "rival@club.es" }
            ]
        })
    }

    #[test]
    fn test_create_match_request_deserializes_slots() {
        let request: CreateMatchRequest = serde_json::from_value(create_json(3)).unwrap();

        assert_eq!(request.match_type, MatchType::LocalTournament);
        assert_eq!(request.format, MatchFormat::Singles);
        assert!(!request.counts_for_ranking);
        assert!(matches!(
            &request.slots[0].occupant,
            SlotOccupant::User { user_id } if user_id == "u1"
        ));
        assert!(matches!(
            &request.slots[1].occupant,
            SlotOccupant::Invite { token: None, .. }
        ));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_match_request_sets_range() {
        let request: CreateMatchRequest = serde_json::from_value(create_json(0)).unwrap();
        assert!(request.validate().is_err());

        let request: CreateMatchRequest = serde_json::from_value(create_json(6)).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_match_request_slot_count() {
        let mut json = create_json(3);
        json["slots"] = serde_json::json!([{ "position": 0, "kind": "user", "user_id": "u1" }]);
        let request: CreateMatchRequest = serde_json::from_value(json).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slots"));
        assert_eq!(errors.field_errors()["slots"][0].params["value"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let mut json = create_json(3);
        json["format"] = serde_json::json!("TRIPLES");
        assert!(serde_json::from_value::<CreateMatchRequest>(json).is_err());
    }

    #[test]
    fn test_submit_result_request_validation() {
        let valid = SubmitResultRequest {
            score: "6-4, 6-3".to_string(),
            notes: None,
        };
        assert!(valid.validate().is_ok());

        let empty = SubmitResultRequest {
            score: String::new(),
            notes: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_rename_slot_request_validation() {
        let too_long = RenameSlotRequest {
            display_name: "x".repeat(41),
        };
        assert!(too_long.validate().is_err());
    }
}
