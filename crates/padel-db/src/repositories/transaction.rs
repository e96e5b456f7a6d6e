//! PostgreSQL implementation of MatchTransaction

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::instrument;

use padel_core::entities::{Invitation, Match, MatchDetails, MatchPlayer, Team, User};
use padel_core::traits::{MatchTransaction, PlayerFilter, RepoResult};
use padel_core::value_objects::{MatchId, PlayerId, TeamId, UserId};

use super::error::map_db_error;
use super::queries;

/// Open PostgreSQL transaction.
///
/// Match rows are read with `FOR UPDATE`, so two transactions touching the
/// same match run one after the other.
pub struct PgMatchTransaction {
    tx: Transaction<'static, Postgres>,
}

impl PgMatchTransaction {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl MatchTransaction for PgMatchTransaction {
    // =========================================================================
    // Users
    // =========================================================================

    #[instrument(skip(self))]
    async fn find_user(&mut self, id: &UserId) -> RepoResult<Option<User>> {
        queries::fetch_user(&mut self.tx, id).await
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&mut self, email: &str) -> RepoResult<Option<User>> {
        queries::fetch_user_by_email(&mut self.tx, email).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create_user(&mut self, user: &User) -> RepoResult<()> {
        queries::insert_user(&mut self.tx, user).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_user(&mut self, user: &User) -> RepoResult<()> {
        queries::update_user(&mut self.tx, user).await
    }

    // =========================================================================
    // Matches
    // =========================================================================

    #[instrument(skip(self, record), fields(match_id = %record.id))]
    async fn create_match(&mut self, record: &Match) -> RepoResult<()> {
        queries::insert_match(&mut self.tx, record).await
    }

    #[instrument(skip(self))]
    async fn find_match(&mut self, id: &MatchId) -> RepoResult<Option<Match>> {
        queries::fetch_match(&mut self.tx, id, true).await
    }

    #[instrument(skip(self))]
    async fn find_match_details(&mut self, id: &MatchId) -> RepoResult<Option<MatchDetails>> {
        queries::fetch_details(&mut self.tx, id, true).await
    }

    #[instrument(skip(self, record), fields(match_id = %record.id))]
    async fn update_match(&mut self, record: &Match) -> RepoResult<()> {
        queries::update_match(&mut self.tx, record).await
    }

    // =========================================================================
    // Slots
    // =========================================================================

    #[instrument(skip(self, player), fields(player_id = %player.id))]
    async fn create_player(&mut self, player: &MatchPlayer) -> RepoResult<()> {
        queries::insert_player(&mut self.tx, player).await
    }

    #[instrument(skip(self))]
    async fn find_player(&mut self, id: &PlayerId) -> RepoResult<Option<MatchPlayer>> {
        queries::fetch_player(&mut self.tx, id).await
    }

    #[instrument(skip(self))]
    async fn find_player_by_user(
        &mut self,
        match_id: &MatchId,
        user_id: &UserId,
    ) -> RepoResult<Option<MatchPlayer>> {
        queries::fetch_player_by_user(&mut self.tx, match_id, user_id).await
    }

    #[instrument(skip(self))]
    async fn find_player_by_position(
        &mut self,
        match_id: &MatchId,
        position: u8,
    ) -> RepoResult<Option<MatchPlayer>> {
        queries::fetch_player_by_position(&mut self.tx, match_id, position).await
    }

    #[instrument(skip(self, player), fields(player_id = %player.id))]
    async fn update_player(&mut self, player: &MatchPlayer) -> RepoResult<()> {
        queries::update_player(&mut self.tx, player).await
    }

    #[instrument(skip(self))]
    async fn confirm_all_players(&mut self, match_id: &MatchId) -> RepoResult<u64> {
        queries::confirm_all_players(&mut self.tx, match_id).await
    }

    #[instrument(skip(self))]
    async fn count_players(&mut self, match_id: &MatchId, filter: &PlayerFilter) -> RepoResult<i64> {
        queries::count_players(&mut self.tx, match_id, filter).await
    }

    // =========================================================================
    // Teams
    // =========================================================================

    #[instrument(skip(self, team), fields(team_id = %team.id))]
    async fn create_team(&mut self, team: &Team) -> RepoResult<()> {
        queries::insert_team(&mut self.tx, team).await
    }

    #[instrument(skip(self))]
    async fn find_team(&mut self, id: &TeamId) -> RepoResult<Option<Team>> {
        queries::fetch_team(&mut self.tx, id).await
    }

    #[instrument(skip(self, team), fields(team_id = %team.id))]
    async fn update_team(&mut self, team: &Team) -> RepoResult<()> {
        queries::update_team(&mut self.tx, team).await
    }

    // =========================================================================
    // Invitations
    // =========================================================================

    #[instrument(skip(self, invitation), fields(match_id = %invitation.match_id))]
    async fn create_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        queries::insert_invitation(&mut self.tx, invitation).await
    }

    #[instrument(skip(self, token))]
    async fn find_invitation(&mut self, match_id: &MatchId, token: &str) -> RepoResult<Option<Invitation>> {
        queries::fetch_invitation(&mut self.tx, match_id, token).await
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn update_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        queries::update_invitation(&mut self.tx, invitation).await
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        self.tx.commit().await.map_err(map_db_error)
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        self.tx.rollback().await.map_err(map_db_error)
    }
}
