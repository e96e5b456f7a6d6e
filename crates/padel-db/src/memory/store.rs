//! In-memory implementation of MatchStore and MatchTransaction

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument};

use padel_core::entities::{Invitation, Match, MatchDetails, MatchPlayer, Team, User};
use padel_core::traits::{MatchStore, MatchTransaction, PlayerFilter, RepoResult};
use padel_core::value_objects::{MatchId, PlayerId, TeamId, UserId};

use super::state::MemoryState;

/// In-memory implementation of MatchStore
#[derive(Clone, Default)]
pub struct MemoryMatchStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn begin(&self) -> RepoResult<Box<dyn MatchTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        debug!("Memory transaction started");
        Ok(Box::new(MemoryTransaction { guard, working }))
    }

    #[instrument(skip(self))]
    async fn find_match_details(&self, id: &MatchId) -> RepoResult<Option<MatchDetails>> {
        Ok(self.state.lock().await.details(id))
    }

    #[instrument(skip(self))]
    async fn find_details_by_player(&self, id: &PlayerId) -> RepoResult<Option<MatchDetails>> {
        let state = self.state.lock().await;
        Ok(state.player(id).and_then(|p| state.details(&p.match_id)))
    }

    #[instrument(skip(self))]
    async fn find_matches_by_user(&self, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.state.lock().await.matches_by_user(user_id, limit))
    }

    #[instrument(skip(self))]
    async fn find_user(&self, id: &UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().await.user(id))
    }

    #[instrument(skip(self))]
    async fn search_users(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.state.lock().await.search_users(query, limit))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// Open in-memory transaction. Holds the store lock until committed or dropped.
pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl MatchTransaction for MemoryTransaction {
    // =========================================================================
    // Users
    // =========================================================================

    async fn find_user(&mut self, id: &UserId) -> RepoResult<Option<User>> {
        Ok(self.working.user(id))
    }

    async fn find_user_by_email(&mut self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.working.user_by_email(email))
    }

    async fn create_user(&mut self, user: &User) -> RepoResult<()> {
        self.working.insert_user(user)
    }

    async fn update_user(&mut self, user: &User) -> RepoResult<()> {
        self.working.update_user(user)
    }

    // =========================================================================
    // Matches
    // =========================================================================

    async fn create_match(&mut self, record: &Match) -> RepoResult<()> {
        self.working.insert_match(record)
    }

    async fn find_match(&mut self, id: &MatchId) -> RepoResult<Option<Match>> {
        Ok(self.working.find_match(id))
    }

    async fn find_match_details(&mut self, id: &MatchId) -> RepoResult<Option<MatchDetails>> {
        Ok(self.working.details(id))
    }

    async fn update_match(&mut self, record: &Match) -> RepoResult<()> {
        self.working.update_match(record)
    }

    // =========================================================================
    // Slots
    // =========================================================================

    async fn create_player(&mut self, player: &MatchPlayer) -> RepoResult<()> {
        self.working.insert_player(player)
    }

    async fn find_player(&mut self, id: &PlayerId) -> RepoResult<Option<MatchPlayer>> {
        Ok(self.working.player(id))
    }

    async fn find_player_by_user(
        &mut self,
        match_id: &MatchId,
        user_id: &UserId,
    ) -> RepoResult<Option<MatchPlayer>> {
        Ok(self.working.player_by_user(match_id, user_id))
    }

    async fn find_player_by_position(
        &mut self,
        match_id: &MatchId,
        position: u8,
    ) -> RepoResult<Option<MatchPlayer>> {
        Ok(self.working.player_by_position(match_id, position))
    }

    async fn update_player(&mut self, player: &MatchPlayer) -> RepoResult<()> {
        self.working.update_player(player)
    }

    async fn confirm_all_players(&mut self, match_id: &MatchId) -> RepoResult<u64> {
        Ok(self.working.confirm_all_players(match_id))
    }

    async fn count_players(&mut self, match_id: &MatchId, filter: &PlayerFilter) -> RepoResult<i64> {
        Ok(self.working.count_players(match_id, filter))
    }

    // =========================================================================
    // Teams
    // =========================================================================

    async fn create_team(&mut self, team: &Team) -> RepoResult<()> {
        self.working.insert_team(team)
    }

    async fn find_team(&mut self, id: &TeamId) -> RepoResult<Option<Team>> {
        Ok(self.working.team(id))
    }

    async fn update_team(&mut self, team: &Team) -> RepoResult<()> {
        self.working.update_team(team)
    }

    // =========================================================================
    // Invitations
    // =========================================================================

    async fn create_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        self.working.insert_invitation(invitation)
    }

    async fn find_invitation(&mut self, match_id: &MatchId, token: &str) -> RepoResult<Option<Invitation>> {
        Ok(self.working.invitation(match_id, token))
    }

    async fn update_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        self.working.update_invitation(invitation)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let Self { mut guard, working } = *self;
        *guard = working;
        debug!("Memory transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepoResult<()> {
        debug!("Memory transaction rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use padel_core::entities::{MatchFormat, MatchStatus, MatchType};

    use super::*;

    fn user(id: &str, name: &str, email: &str) -> User {
        User::new(UserId::new(id), name.to_string(), Some(email.to_string()), Utc::now())
    }

    async fn seed_match(store: &MemoryMatchStore) -> (MatchId, Vec<PlayerId>) {
        let match_id = MatchId::generate();
        let mut tx = store.begin().await.unwrap();
        tx.create_user(&user("u1", "Ana", "ana@club.es")).await.unwrap();
        tx.create_match(&Match::new(
            match_id.clone(),
            UserId::new("u1"),
            3,
            MatchType::Friendly,
            MatchFormat::Doubles,
            Utc::now(),
        ))
        .await
        .unwrap();

        let mut ids = Vec::new();
        for position in 0..4u8 {
            let id = PlayerId::generate();
            let player = if position == 0 {
                MatchPlayer::for_user(id.clone(), match_id.clone(), 0, UserId::new("u1"))
            } else {
                MatchPlayer::placeholder(id.clone(), match_id.clone(), position, format!("P{position}"))
            };
            tx.create_player(&player).await.unwrap();
            ids.push(id);
        }
        tx.commit().await.unwrap();
        (match_id, ids)
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryMatchStore>();
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = MemoryMatchStore::new();
        let (match_id, _) = seed_match(&store).await;

        let details = store.find_match_details(&match_id).await.unwrap().unwrap();
        assert_eq!(details.players.len(), 4);
        assert_eq!(details.users.len(), 1);
        assert_eq!(details.record.status, MatchStatus::Pending);
    }

    #[tokio::test]
    async fn test_rollback_and_drop_discard_writes() {
        let store = MemoryMatchStore::new();
        let (match_id, ids) = seed_match(&store).await;

        let mut tx = store.begin().await.unwrap();
        tx.confirm_all_players(&match_id).await.unwrap();
        tx.rollback().await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            let mut p = tx.find_player(&ids[1]).await.unwrap().unwrap();
            p.display_name = Some("Changed".into());
            tx.update_player(&p).await.unwrap();
        }

        let details = store.find_match_details(&match_id).await.unwrap().unwrap();
        assert!(details.players.iter().all(|p| !p.confirmed));
        assert_eq!(details.players[1].display_name.as_deref(), Some("P1"));
    }

    #[tokio::test]
    async fn test_count_players_with_filter() {
        let store = MemoryMatchStore::new();
        let (match_id, ids) = seed_match(&store).await;

        let mut tx = store.begin().await.unwrap();
        let mut p = tx.find_player(&ids[2]).await.unwrap().unwrap();
        p.confirmed = true;
        tx.update_player(&p).await.unwrap();

        let on_b = PlayerFilter::confirmed_on(MatchFormat::Doubles, padel_core::TeamKey::B);
        let on_a = PlayerFilter::confirmed_on(MatchFormat::Doubles, padel_core::TeamKey::A);
        assert_eq!(tx.count_players(&match_id, &on_b).await.unwrap(), 1);
        assert_eq!(tx.count_players(&match_id, &on_a).await.unwrap(), 0);
        assert_eq!(tx.count_players(&match_id, &PlayerFilter::all()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_one_slot_per_user_per_match() {
        let store = MemoryMatchStore::new();
        let (match_id, ids) = seed_match(&store).await;

        let mut tx = store.begin().await.unwrap();
        let mut p = tx.find_player(&ids[3]).await.unwrap().unwrap();
        p.claim(UserId::new("u1"), false, Utc::now());
        let err = tx.update_player(&p).await.unwrap_err();
        assert!(matches!(err, padel_core::DomainError::AlreadyInMatch));
        assert!(tx.find_player_by_user(&match_id, &UserId::new("u1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_search_users_is_case_insensitive_and_sorted() {
        let store = MemoryMatchStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create_user(&user("u1", "Zoe", "zoe@club.es")).await.unwrap();
        tx.create_user(&user("u2", "alberto", "al@padel.es")).await.unwrap();
        tx.create_user(&user("u3", "Marta", "marta@club.es")).await.unwrap();
        tx.commit().await.unwrap();

        let found = store.search_users("CLUB", 10).await.unwrap();
        let names: Vec<_> = found.iter().map(|u| u.display_name.as_str()).collect();
        assert_eq!(names, vec!["Marta", "Zoe"]);

        let all = store.search_users("", 2).await.unwrap();
        assert_eq!(all[0].display_name, "alberto");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryMatchStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create_user(&user("u1", "Ana", "ana@club.es")).await.unwrap();
        let err = tx.create_user(&user("u2", "Ana B", "ana@club.es")).await.unwrap_err();
        assert!(matches!(err, padel_core::DomainError::EmailAlreadyExists));
    }
}
