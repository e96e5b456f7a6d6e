//! Table contents of the in-memory store

use std::collections::HashMap;

use padel_core::entities::{Invitation, Match, MatchDetails, MatchPlayer, Team, User};
use padel_core::error::DomainError;
use padel_core::traits::{PlayerFilter, RepoResult};
use padel_core::value_objects::{InvitationId, MatchId, PlayerId, TeamId, UserId};

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    users: HashMap<UserId, User>,
    matches: HashMap<MatchId, Match>,
    players: HashMap<PlayerId, MatchPlayer>,
    teams: HashMap<TeamId, Team>,
    invitations: HashMap<InvitationId, Invitation>,
}

impl MemoryState {
    // =========================================================================
    // Users
    // =========================================================================

    pub fn user(&self, id: &UserId) -> Option<User> {
        self.users.get(id).cloned()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned()
    }

    fn email_taken(&self, user: &User) -> bool {
        user.email.as_deref().is_some_and(|email| {
            self.users
                .values()
                .any(|u| u.id != user.id && u.email.as_deref() == Some(email))
        })
    }

    pub fn insert_user(&mut self, user: &User) -> RepoResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::DatabaseError(format!("duplicate user id {}", user.id)));
        }
        if self.email_taken(user) {
            return Err(DomainError::EmailAlreadyExists);
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    pub fn update_user(&mut self, user: &User) -> RepoResult<()> {
        if !self.users.contains_key(&user.id) {
            return Err(DomainError::UserNotFound(user.id.clone()));
        }
        if self.email_taken(user) {
            return Err(DomainError::EmailAlreadyExists);
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    pub fn search_users(&self, query: &str, limit: usize) -> Vec<User> {
        let needle = query.to_lowercase();
        let mut found: Vec<User> = self
            .users
            .values()
            .filter(|u| {
                u.display_name.to_lowercase().contains(&needle)
                    || u.email
                        .as_deref()
                        .is_some_and(|e| e.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        found.sort_by_cached_key(|u| u.display_name.to_lowercase());
        found.truncate(limit);
        found
    }

    // =========================================================================
    // Matches
    // =========================================================================

    pub fn find_match(&self, id: &MatchId) -> Option<Match> {
        self.matches.get(id).cloned()
    }

    pub fn insert_match(&mut self, record: &Match) -> RepoResult<()> {
        if !self.users.contains_key(&record.creator_id) {
            return Err(DomainError::DatabaseError(format!(
                "creator {} does not exist",
                record.creator_id
            )));
        }
        if self.matches.contains_key(&record.id) {
            return Err(DomainError::DatabaseError(format!("duplicate match id {}", record.id)));
        }
        self.matches.insert(record.id.clone(), record.clone());
        Ok(())
    }

    pub fn update_match(&mut self, record: &Match) -> RepoResult<()> {
        let slot = self
            .matches
            .get_mut(&record.id)
            .ok_or_else(|| DomainError::MatchNotFound(record.id.clone()))?;
        *slot = record.clone();
        Ok(())
    }

    pub fn details(&self, id: &MatchId) -> Option<MatchDetails> {
        let record = self.matches.get(id)?.clone();
        let players: Vec<MatchPlayer> = self.players_of(id).cloned().collect();
        let mut teams: Vec<Team> = self
            .teams
            .values()
            .filter(|t| &t.match_id == id)
            .cloned()
            .collect();
        teams.sort_by_key(|t| t.key);
        let users = players
            .iter()
            .filter_map(|p| p.user_id.as_ref())
            .filter_map(|uid| self.users.get(uid).cloned())
            .collect();
        Some(MatchDetails::new(record, players, teams, users))
    }

    pub fn matches_by_user(&self, user_id: &UserId, limit: usize) -> Vec<Match> {
        let mut found: Vec<Match> = self
            .matches
            .values()
            .filter(|m| self.players_of(&m.id).any(|p| p.is_held_by(user_id)))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        found.truncate(limit);
        found
    }

    // =========================================================================
    // Slots
    // =========================================================================

    fn players_of<'a>(&'a self, match_id: &'a MatchId) -> impl Iterator<Item = &'a MatchPlayer> {
        self.players.values().filter(move |p| &p.match_id == match_id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<MatchPlayer> {
        self.players.get(id).cloned()
    }

    pub fn player_by_user(&self, match_id: &MatchId, user_id: &UserId) -> Option<MatchPlayer> {
        self.players_of(match_id).find(|p| p.is_held_by(user_id)).cloned()
    }

    pub fn player_by_position(&self, match_id: &MatchId, position: u8) -> Option<MatchPlayer> {
        self.players_of(match_id).find(|p| p.position == position).cloned()
    }

    fn check_player_constraints(&self, player: &MatchPlayer) -> RepoResult<()> {
        if !self.matches.contains_key(&player.match_id) {
            return Err(DomainError::MatchNotFound(player.match_id.clone()));
        }
        let clash = self
            .players_of(&player.match_id)
            .filter(|p| p.id != player.id)
            .find(|p| {
                p.position == player.position
                    || player.user_id.as_ref().is_some_and(|uid| p.is_held_by(uid))
            });
        match clash {
            Some(p) if p.position == player.position => Err(DomainError::DatabaseError(format!(
                "duplicate slot position {}",
                player.position
            ))),
            Some(_) => Err(DomainError::AlreadyInMatch),
            None => Ok(()),
        }
    }

    pub fn insert_player(&mut self, player: &MatchPlayer) -> RepoResult<()> {
        self.check_player_constraints(player)?;
        self.players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    pub fn update_player(&mut self, player: &MatchPlayer) -> RepoResult<()> {
        if !self.players.contains_key(&player.id) {
            return Err(DomainError::PlayerNotFound(player.id.clone()));
        }
        self.check_player_constraints(player)?;
        self.players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    pub fn confirm_all_players(&mut self, match_id: &MatchId) -> u64 {
        let mut changed = 0;
        for p in self.players.values_mut().filter(|p| &p.match_id == match_id) {
            if !p.confirmed {
                p.confirmed = true;
                changed += 1;
            }
        }
        changed
    }

    pub fn count_players(&self, match_id: &MatchId, filter: &PlayerFilter) -> i64 {
        self.players_of(match_id).filter(|p| filter.matches(p)).count() as i64
    }

    // =========================================================================
    // Teams
    // =========================================================================

    pub fn team(&self, id: &TeamId) -> Option<Team> {
        self.teams.get(id).cloned()
    }

    pub fn insert_team(&mut self, team: &Team) -> RepoResult<()> {
        if self
            .teams
            .values()
            .any(|t| t.match_id == team.match_id && t.key == team.key)
        {
            return Err(DomainError::DatabaseError(format!(
                "team {} already exists for match {}",
                team.key.as_str(),
                team.match_id
            )));
        }
        self.teams.insert(team.id.clone(), team.clone());
        Ok(())
    }

    pub fn update_team(&mut self, team: &Team) -> RepoResult<()> {
        let slot = self
            .teams
            .get_mut(&team.id)
            .ok_or_else(|| DomainError::TeamNotFound(team.id.clone()))?;
        slot.label.clone_from(&team.label);
        Ok(())
    }

    // =========================================================================
    // Invitations
    // =========================================================================

    pub fn invitation(&self, match_id: &MatchId, token: &str) -> Option<Invitation> {
        self.invitations
            .values()
            .find(|i| &i.match_id == match_id && i.token == token)
            .cloned()
    }

    pub fn insert_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        if self.invitation(&invitation.match_id, &invitation.token).is_some() {
            return Err(DomainError::ValidationError(
                "invitation token already used in this match".to_string(),
            ));
        }
        self.invitations
            .insert(invitation.id.clone(), invitation.clone());
        Ok(())
    }

    pub fn update_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        let slot = self
            .invitations
            .get_mut(&invitation.id)
            .ok_or(DomainError::InvitationNotFound)?;
        slot.accepted = invitation.accepted;
        slot.expires_at = invitation.expires_at;
        Ok(())
    }
}
