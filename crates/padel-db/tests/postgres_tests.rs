//! PostgreSQL store tests
//!
//! Require a reachable database in `DATABASE_URL`; each test returns early
//! when it is unset.
//!
//! Run with: cargo test -p padel-db --test postgres_tests

use chrono::Utc;
use padel_core::entities::{Match, MatchFormat, MatchPlayer, MatchStatus, MatchType, Team, TeamKey, User};
use padel_core::traits::{MatchStore, PlayerFilter};
use padel_core::value_objects::{MatchId, PlayerId, TeamId, UserId};
use padel_core::DomainError;
use padel_db::{apply_schema, create_pool, DatabaseConfig, PgMatchStore};

async fn store() -> Option<PgMatchStore> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return None;
    };

    let pool = create_pool(&DatabaseConfig::new(url)).await.unwrap();
    apply_schema(&pool).await.unwrap();
    Some(PgMatchStore::new(pool))
}

fn user() -> User {
    let id = UserId::generate();
    let email = format!("{id}@club.es");
    User::new(id, "Ana".to_string(), Some(email), Utc::now())
}

/// A doubles match created by `creator` with placeholders elsewhere
async fn seed_match(store: &PgMatchStore, creator: &User) -> MatchId {
    let now = Utc::now();
    let record = Match::new(
        MatchId::generate(),
        creator.id.clone(),
        3,
        MatchType::Friendly,
        MatchFormat::Doubles,
        now,
    );

    let mut tx = store.begin().await.unwrap();
    tx.create_user(creator).await.unwrap();
    tx.create_match(&record).await.unwrap();
    for key in [TeamKey::A, TeamKey::B] {
        let team = Team::new(TeamId::generate(), record.id.clone(), key, record.format, None);
        tx.create_team(&team).await.unwrap();
    }
    let mut anchor = MatchPlayer::for_user(PlayerId::generate(), record.id.clone(), 0, creator.id.clone());
    anchor.joined_at = Some(now);
    tx.create_player(&anchor).await.unwrap();
    for (position, name) in [(1, "Bea"), (2, "Carla"), (3, "Dani")] {
        let player = MatchPlayer::placeholder(PlayerId::generate(), record.id.clone(), position, name.to_string());
        tx.create_player(&player).await.unwrap();
    }
    tx.commit().await.unwrap();

    record.id
}

#[tokio::test]
async fn test_committed_match_is_readable() {
    let Some(store) = store().await else { return };
    let creator = user();
    let id = seed_match(&store, &creator).await;

    let details = store.find_match_details(&id).await.unwrap().unwrap();
    assert_eq!(details.record.status, MatchStatus::Pending);
    assert_eq!(details.players.len(), 4);
    assert_eq!(details.teams.len(), 2);
    assert_eq!(details.players[0].user_id.as_ref(), Some(&creator.id));
    assert_eq!(details.slot_name(&details.players[1]), "Bea");

    let mine = store.find_matches_by_user(&creator.id, 20).await.unwrap();
    assert!(mine.iter().any(|m| m.id == id));
}

#[tokio::test]
async fn test_rollback_discards_writes() {
    let Some(store) = store().await else { return };
    let ghost = user();

    let mut tx = store.begin().await.unwrap();
    tx.create_user(&ghost).await.unwrap();
    tx.rollback().await.unwrap();

    assert!(store.find_user(&ghost.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let Some(store) = store().await else { return };
    let first = user();
    let mut second = user();
    second.email.clone_from(&first.email);

    let mut tx = store.begin().await.unwrap();
    tx.create_user(&first).await.unwrap();
    let err = tx.create_user(&second).await.unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyExists));
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn test_confirmation_counts() {
    let Some(store) = store().await else { return };
    let creator = user();
    let id = seed_match(&store, &creator).await;

    let mut tx = store.begin().await.unwrap();
    let mut anchor = tx.find_player_by_position(&id, 0).await.unwrap().unwrap();
    anchor.confirmed = true;
    tx.update_player(&anchor).await.unwrap();

    let format = MatchFormat::Doubles;
    let confirmed_a = tx
        .count_players(&id, &PlayerFilter::confirmed_on(format, TeamKey::A))
        .await
        .unwrap();
    let confirmed_b = tx
        .count_players(&id, &PlayerFilter::confirmed_on(format, TeamKey::B))
        .await
        .unwrap();
    assert_eq!((confirmed_a, confirmed_b), (1, 0));

    let changed = tx.confirm_all_players(&id).await.unwrap();
    assert_eq!(changed, 3);
    let confirmed = tx.count_players(&id, &PlayerFilter::confirmed()).await.unwrap();
    assert_eq!(confirmed, 4);
    tx.commit().await.unwrap();
}

#[tokio::test]
async fn test_find_player_by_user() {
    let Some(store) = store().await else { return };
    let creator = user();
    let id = seed_match(&store, &creator).await;

    let mut tx = store.begin().await.unwrap();
    let held = tx.find_player_by_user(&id, &creator.id).await.unwrap().unwrap();
    assert_eq!(held.position, 0);
    let none = tx.find_player_by_user(&id, &UserId::generate()).await.unwrap();
    assert!(none.is_none());
    tx.rollback().await.unwrap();
}
