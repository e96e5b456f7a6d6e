//! Storage traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every mutation goes through a
//! [`MatchTransaction`], which applies all of its writes or none of them.

use async_trait::async_trait;

use crate::entities::{
    Invitation, Match, MatchDetails, MatchFormat, MatchPlayer, Team, TeamKey, User,
};
use crate::error::DomainError;
use crate::value_objects::{MatchId, PlayerId, TeamId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Filter for counting the slots of a match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    /// Only these positions; all positions when `None`
    pub positions: Option<Vec<u8>>,
    /// Only slots with this confirmation flag; any when `None`
    pub confirmed: Option<bool>,
}

impl PlayerFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn confirmed() -> Self {
        Self {
            positions: None,
            confirmed: Some(true),
        }
    }

    /// Slots of one team
    pub fn team(format: MatchFormat, key: TeamKey) -> Self {
        Self {
            positions: Some(format.positions(key).collect()),
            confirmed: None,
        }
    }

    /// Confirmed slots of one team
    pub fn confirmed_on(format: MatchFormat, key: TeamKey) -> Self {
        Self {
            confirmed: Some(true),
            ..Self::team(format, key)
        }
    }

    pub fn matches(&self, player: &MatchPlayer) -> bool {
        self.positions
            .as_ref()
            .map_or(true, |ps| ps.contains(&player.position))
            && self.confirmed.map_or(true, |c| player.confirmed == c)
    }
}

// ============================================================================
// Match Store
// ============================================================================

/// Entry point to storage: read-only queries plus transaction creation
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Open a new transaction
    async fn begin(&self) -> RepoResult<Box<dyn MatchTransaction>>;

    /// Load a match with its slots, teams and referenced users
    async fn find_match_details(&self, id: &MatchId) -> RepoResult<Option<MatchDetails>>;

    /// Load the match aggregate a slot belongs to
    async fn find_details_by_player(&self, id: &PlayerId) -> RepoResult<Option<MatchDetails>>;

    /// Matches in which the user occupies a slot, most recently updated first
    async fn find_matches_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>>;

    /// Find user by ID
    async fn find_user(&self, id: &UserId) -> RepoResult<Option<User>>;

    /// Case-insensitive substring search over display name and email
    async fn search_users(&self, query: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// Check the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Match Transaction
// ============================================================================

/// Transactional handle. Dropping it without calling [`commit`](Self::commit)
/// discards every write.
#[async_trait]
pub trait MatchTransaction: Send {
    // --- users ---
    async fn find_user(&mut self, id: &UserId) -> RepoResult<Option<User>>;
    async fn find_user_by_email(&mut self, email: &str) -> RepoResult<Option<User>>;
    async fn create_user(&mut self, user: &User) -> RepoResult<()>;
    async fn update_user(&mut self, user: &User) -> RepoResult<()>;

    // --- matches ---
    async fn create_match(&mut self, record: &Match) -> RepoResult<()>;
    async fn find_match(&mut self, id: &MatchId) -> RepoResult<Option<Match>>;
    async fn find_match_details(&mut self, id: &MatchId) -> RepoResult<Option<MatchDetails>>;
    async fn update_match(&mut self, record: &Match) -> RepoResult<()>;

    // --- slots ---
    async fn create_player(&mut self, player: &MatchPlayer) -> RepoResult<()>;
    async fn find_player(&mut self, id: &PlayerId) -> RepoResult<Option<MatchPlayer>>;
    async fn find_player_by_user(
        &mut self,
        match_id: &MatchId,
        user_id: &UserId,
    ) -> RepoResult<Option<MatchPlayer>>;
    async fn find_player_by_position(
        &mut self,
        match_id: &MatchId,
        position: u8,
    ) -> RepoResult<Option<MatchPlayer>>;
    async fn update_player(&mut self, player: &MatchPlayer) -> RepoResult<()>;
    /// Mark every slot of a match confirmed, returning how many changed
    async fn confirm_all_players(&mut self, match_id: &MatchId) -> RepoResult<u64>;
    async fn count_players(&mut self, match_id: &MatchId, filter: &PlayerFilter) -> RepoResult<i64>;

    // --- teams ---
    async fn create_team(&mut self, team: &Team) -> RepoResult<()>;
    async fn find_team(&mut self, id: &TeamId) -> RepoResult<Option<Team>>;
    async fn update_team(&mut self, team: &Team) -> RepoResult<()>;

    // --- invitations ---
    async fn create_invitation(&mut self, invitation: &Invitation) -> RepoResult<()>;
    async fn find_invitation(&mut self, match_id: &MatchId, token: &str) -> RepoResult<Option<Invitation>>;
    async fn update_invitation(&mut self, invitation: &Invitation) -> RepoResult<()>;

    // --- lifecycle ---
    async fn commit(self: Box<Self>) -> RepoResult<()>;
    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}
