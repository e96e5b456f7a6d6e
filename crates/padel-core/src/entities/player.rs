//! MatchPlayer entity - one slot of a match

use chrono::{DateTime, Utc};

use crate::value_objects::{MatchId, PlayerId, TeamId, UserId};

/// One slot within a match.
///
/// A slot is occupied either by a user (`user_id`) or described only by a
/// placeholder `display_name`; never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlayer {
    pub id: PlayerId,
    pub match_id: MatchId,
    pub position: u8,
    pub user_id: Option<UserId>,
    pub display_name: Option<String>,
    pub team_id: Option<TeamId>,
    pub confirmed: bool,
    pub joined_at: Option<DateTime<Utc>>,
}

impl MatchPlayer {
    /// Slot bound to a registered user
    pub fn for_user(id: PlayerId, match_id: MatchId, position: u8, user_id: UserId) -> Self {
        Self {
            id,
            match_id,
            position,
            user_id: Some(user_id),
            display_name: None,
            team_id: None,
            confirmed: false,
            joined_at: None,
        }
    }

    /// Slot held by a named placeholder
    pub fn placeholder(id: PlayerId, match_id: MatchId, position: u8, display_name: String) -> Self {
        Self {
            id,
            match_id,
            position,
            user_id: None,
            display_name: Some(display_name),
            team_id: None,
            confirmed: false,
            joined_at: None,
        }
    }

    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.user_id.is_some()
    }

    #[inline]
    pub fn is_held_by(&self, user_id: &UserId) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    /// Bind the slot to a user
    pub fn claim(&mut self, user_id: UserId, confirmed: bool, now: DateTime<Utc>) {
        self.user_id = Some(user_id);
        self.display_name = None;
        self.confirmed = confirmed;
        self.joined_at = Some(now);
    }

    /// Free the slot, leaving `fallback_name` as placeholder
    pub fn release(&mut self, fallback_name: Option<String>) {
        self.user_id = None;
        self.display_name = fallback_name;
        self.confirmed = false;
        self.joined_at = None;
    }
}

/// Name shown for a slot nobody has named
pub fn default_slot_name(position: u8) -> String {
    format!("Jugador {}", u16::from(position) + 1)
}
