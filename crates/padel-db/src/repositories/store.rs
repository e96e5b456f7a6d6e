//! PostgreSQL implementation of MatchStore

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use padel_core::entities::{Match, MatchDetails, User};
use padel_core::traits::{MatchStore, MatchTransaction, RepoResult};
use padel_core::value_objects::{MatchId, PlayerId, UserId};

use super::error::map_db_error;
use super::queries;
use super::transaction::PgMatchTransaction;

/// PostgreSQL implementation of MatchStore
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    /// Create a new PgMatchStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn MatchTransaction>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgMatchTransaction::new(tx)))
    }

    #[instrument(skip(self))]
    async fn find_match_details(&self, id: &MatchId) -> RepoResult<Option<MatchDetails>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        queries::fetch_details(&mut conn, id, false).await
    }

    #[instrument(skip(self))]
    async fn find_details_by_player(&self, id: &PlayerId) -> RepoResult<Option<MatchDetails>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let Some(player) = queries::fetch_player(&mut conn, id).await? else {
            return Ok(None);
        };
        queries::fetch_details(&mut conn, &player.match_id, false).await
    }

    #[instrument(skip(self))]
    async fn find_matches_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        queries::fetch_matches_by_user(&mut conn, user_id, limit).await
    }

    #[instrument(skip(self))]
    async fn find_user(&self, id: &UserId) -> RepoResult<Option<User>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        queries::fetch_user(&mut conn, id).await
    }

    #[instrument(skip(self))]
    async fn search_users(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        queries::search_users(&mut conn, query, limit).await
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
