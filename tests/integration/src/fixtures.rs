//! Request bodies and typed views of responses

use serde::Deserialize;
use serde_json::{json, Value};

/// Doubles match with `creator` at position 0 and placeholders elsewhere
pub fn doubles_with_placeholders(creator: &str) -> Value {
    json!({
        "sets": 3,
        "format": "DOUBLES",
        "match_type": "FRIENDLY",
        "club": "Club Náutico",
        "slots": [
            { "position": 0, "kind": "user", "user_id": creator },
            { "position": 1, "kind": "placeholder", "display_name": "Bea" },
            { "position": 2, "kind": "placeholder", "display_name": "Carla" },
            { "position": 3, "kind": "placeholder", "display_name": "Dani" },
        ],
    })
}

/// Doubles match with an email invitation at position 2
pub fn doubles_with_invite(creator: &str, email: &str, token: &str) -> Value {
    json!({
        "sets": 3,
        "format": "DOUBLES",
        "slots": [
            { "position": 0, "kind": "user", "user_id": creator },
            { "position": 1, "kind": "placeholder", "display_name": "Bea" },
            { "position": 2, "kind": "invite", "email": email, "token": token },
            { "position": 3, "kind": "placeholder", "display_name": "Dani" },
        ],
    })
}

pub fn score(value: &str) -> Value {
    json!({ "score": value })
}

#[derive(Debug, Deserialize)]
pub struct CreatedMatch {
    pub match_id: String,
    pub share_link: String,
    pub join_links: Vec<JoinLink>,
    pub invitation_links: Vec<InvitationLink>,
}

#[derive(Debug, Deserialize)]
pub struct JoinLink {
    pub player_id: String,
    pub position: u8,
    pub link: String,
}

#[derive(Debug, Deserialize)]
pub struct InvitationLink {
    pub position: u8,
    pub link: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchView {
    pub id: String,
    pub status: String,
    pub score: Option<String>,
    pub teams: Vec<TeamView>,
    pub slots: Vec<SlotView>,
    pub viewer: Viewer,
}

impl MatchView {
    pub fn slot(&self, position: u8) -> &SlotView {
        self.slots
            .iter()
            .find(|s| s.position == position)
            .unwrap_or_else(|| panic!("no slot at position {position}"))
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamView {
    pub id: String,
    pub key: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct SlotView {
    pub id: String,
    pub position: u8,
    pub display_name: String,
    pub user_id: Option<String>,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub is_creator: bool,
    pub is_participant: bool,
    pub can_submit_result: bool,
}
