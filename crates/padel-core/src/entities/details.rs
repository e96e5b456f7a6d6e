//! MatchDetails aggregate - a match with its slots, teams and the users occupying them

use super::padel_match::Match;
use super::player::{default_slot_name, MatchPlayer};
use super::team::{Team, TeamKey};
use super::user::User;
use crate::value_objects::{PlayerId, TeamId, UserId};

/// Fully loaded match aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetails {
    pub record: Match,
    /// Ordered by position
    pub players: Vec<MatchPlayer>,
    pub teams: Vec<Team>,
    /// Users referenced by `players`
    pub users: Vec<User>,
}

impl MatchDetails {
    pub fn new(record: Match, mut players: Vec<MatchPlayer>, teams: Vec<Team>, users: Vec<User>) -> Self {
        players.sort_by_key(|p| p.position);
        Self {
            record,
            players,
            teams,
            users,
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Slot held by `user_id`, if any
    pub fn player_for_user(&self, user_id: &UserId) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| p.is_held_by(user_id))
    }

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        self.player_for_user(user_id).is_some()
    }

    pub fn team(&self, key: TeamKey) -> Option<&Team> {
        self.teams.iter().find(|t| t.key == key)
    }

    pub fn team_by_id(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub fn team_key_of(&self, player: &MatchPlayer) -> TeamKey {
        self.record.format.team_for_position(player.position)
    }

    /// Team label of a slot, falling back to the default label
    pub fn team_label_of(&self, player: &MatchPlayer) -> String {
        let key = self.team_key_of(player);
        self.team(key).map_or_else(
            || key.default_label(self.record.format).to_string(),
            |t| t.label.clone(),
        )
    }

    /// Name shown for a slot: the user's name, else the placeholder name,
    /// else a positional default
    pub fn slot_name(&self, player: &MatchPlayer) -> String {
        player
            .user_id
            .as_ref()
            .and_then(|id| self.user(id))
            .map(|u| u.display_name.clone())
            .or_else(|| player.display_name.clone())
            .unwrap_or_else(|| default_slot_name(player.position))
    }

    pub fn players_on(&self, key: TeamKey) -> impl Iterator<Item = &MatchPlayer> {
        let format = self.record.format;
        self.players
            .iter()
            .filter(move |p| format.team_for_position(p.position) == key)
    }
}
