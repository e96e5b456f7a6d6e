//! SQL statements shared by the pooled store and the transaction handle
//!
//! Every function takes a `&mut PgConnection`, so the same statement runs on a
//! pooled connection or inside an open transaction.

use sqlx::PgConnection;

use padel_core::entities::{Invitation, Match, MatchDetails, MatchPlayer, Team, User};
use padel_core::error::DomainError;
use padel_core::traits::{PlayerFilter, RepoResult};
use padel_core::value_objects::{MatchId, PlayerId, TeamId, UserId};

use crate::models::{InvitationModel, MatchModel, MatchPlayerModel, TeamModel, UserModel};

use super::error::{
    invitation_not_found, map_db_error, map_unique_violation, match_not_found, player_not_found,
    team_not_found, user_not_found,
};

// ============================================================================
// Users
// ============================================================================

pub async fn fetch_user(conn: &mut PgConnection, id: &UserId) -> RepoResult<Option<User>> {
    let result = sqlx::query_as::<_, UserModel>(
        r#"
        SELECT id, email, display_name, image, level, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(User::from))
}

pub async fn fetch_user_by_email(conn: &mut PgConnection, email: &str) -> RepoResult<Option<User>> {
    let result = sqlx::query_as::<_, UserModel>(
        r#"
        SELECT id, email, display_name, image, level, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(User::from))
}

pub async fn insert_user(conn: &mut PgConnection, user: &User) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, display_name, image, level, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user.id.as_str())
    .bind(user.email.as_deref())
    .bind(&user.display_name)
    .bind(user.image.as_deref())
    .bind(user.level)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

    Ok(())
}

pub async fn update_user(conn: &mut PgConnection, user: &User) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET email = $2, display_name = $3, image = $4, level = $5, updated_at = $6
        WHERE id = $1
        "#,
    )
    .bind(user.id.as_str())
    .bind(user.email.as_deref())
    .bind(&user.display_name)
    .bind(user.image.as_deref())
    .bind(user.level)
    .bind(user.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

    if result.rows_affected() == 0 {
        return Err(user_not_found(&user.id));
    }

    Ok(())
}

pub async fn search_users(conn: &mut PgConnection, query: &str, limit: i64) -> RepoResult<Vec<User>> {
    let pattern = format!(
        "%{}%",
        query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    );

    let results = sqlx::query_as::<_, UserModel>(
        r#"
        SELECT id, email, display_name, image, level, created_at, updated_at
        FROM users
        WHERE display_name ILIKE $1 OR email ILIKE $1
        ORDER BY display_name ASC
        LIMIT $2
        "#,
    )
    .bind(pattern)
    .bind(limit)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(results.into_iter().map(User::from).collect())
}

/// Users occupying a slot of the match
async fn fetch_users_for_match(conn: &mut PgConnection, match_id: &MatchId) -> RepoResult<Vec<User>> {
    let results = sqlx::query_as::<_, UserModel>(
        r#"
        SELECT u.id, u.email, u.display_name, u.image, u.level, u.created_at, u.updated_at
        FROM users u
        WHERE u.id IN (SELECT p.user_id FROM match_players p WHERE p.match_id = $1)
        "#,
    )
    .bind(match_id.as_str())
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(results.into_iter().map(User::from).collect())
}

// ============================================================================
// Matches
// ============================================================================

/// Load a match row. With `lock`, the row stays locked until the
/// surrounding transaction ends.
pub async fn fetch_match(conn: &mut PgConnection, id: &MatchId, lock: bool) -> RepoResult<Option<Match>> {
    let sql = if lock {
        r#"
        SELECT id, creator_id, status, sets, match_type, format, counts_for_ranking,
               club, court_number, notes, score, created_at, updated_at
        FROM matches
        WHERE id = $1
        FOR UPDATE
        "#
    } else {
        r#"
        SELECT id, creator_id, status, sets, match_type, format, counts_for_ranking,
               club, court_number, notes, score, created_at, updated_at
        FROM matches
        WHERE id = $1
        "#
    };

    let result = sqlx::query_as::<_, MatchModel>(sql)
        .bind(id.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

    Ok(result.map(Match::from))
}

pub async fn fetch_details(conn: &mut PgConnection, id: &MatchId, lock: bool) -> RepoResult<Option<MatchDetails>> {
    let Some(record) = fetch_match(conn, id, lock).await? else {
        return Ok(None);
    };

    let players = sqlx::query_as::<_, MatchPlayerModel>(
        r#"
        SELECT id, match_id, position, user_id, display_name, team_id, confirmed, joined_at
        FROM match_players
        WHERE match_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(id.as_str())
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let teams = sqlx::query_as::<_, TeamModel>(
        r#"
        SELECT id, match_id, team_key, label
        FROM teams
        WHERE match_id = $1
        ORDER BY team_key ASC
        "#,
    )
    .bind(id.as_str())
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let users = fetch_users_for_match(conn, id).await?;

    Ok(Some(MatchDetails::new(
        record,
        players.into_iter().map(MatchPlayer::from).collect(),
        teams.into_iter().map(Team::from).collect(),
        users,
    )))
}

pub async fn fetch_matches_by_user(conn: &mut PgConnection, user_id: &UserId, limit: i64) -> RepoResult<Vec<Match>> {
    let results = sqlx::query_as::<_, MatchModel>(
        r#"
        SELECT m.id, m.creator_id, m.status, m.sets, m.match_type, m.format,
               m.counts_for_ranking, m.club, m.court_number, m.notes, m.score,
               m.created_at, m.updated_at
        FROM matches m
        WHERE EXISTS (
            SELECT 1 FROM match_players p WHERE p.match_id = m.id AND p.user_id = $1
        )
        ORDER BY m.updated_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id.as_str())
    .bind(limit)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(results.into_iter().map(Match::from).collect())
}

pub async fn insert_match(conn: &mut PgConnection, record: &Match) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO matches (id, creator_id, status, sets, match_type, format, counts_for_ranking,
                             club, court_number, notes, score, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(record.id.as_str())
    .bind(record.creator_id.as_str())
    .bind(record.status.as_str())
    .bind(i16::from(record.sets))
    .bind(record.match_type.as_str())
    .bind(record.format.as_str())
    .bind(record.counts_for_ranking)
    .bind(record.club.as_deref())
    .bind(record.court_number.as_deref())
    .bind(record.notes.as_deref())
    .bind(record.score.as_deref())
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

pub async fn update_match(conn: &mut PgConnection, record: &Match) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE matches
        SET status = $2, sets = $3, match_type = $4, counts_for_ranking = $5,
            club = $6, court_number = $7, notes = $8, score = $9, updated_at = $10
        WHERE id = $1
        "#,
    )
    .bind(record.id.as_str())
    .bind(record.status.as_str())
    .bind(i16::from(record.sets))
    .bind(record.match_type.as_str())
    .bind(record.counts_for_ranking)
    .bind(record.club.as_deref())
    .bind(record.court_number.as_deref())
    .bind(record.notes.as_deref())
    .bind(record.score.as_deref())
    .bind(record.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(match_not_found(&record.id));
    }

    Ok(())
}

// ============================================================================
// Slots
// ============================================================================

pub async fn fetch_player(conn: &mut PgConnection, id: &PlayerId) -> RepoResult<Option<MatchPlayer>> {
    let result = sqlx::query_as::<_, MatchPlayerModel>(
        r#"
        SELECT id, match_id, position, user_id, display_name, team_id, confirmed, joined_at
        FROM match_players
        WHERE id = $1
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(MatchPlayer::from))
}

pub async fn fetch_player_by_user(
    conn: &mut PgConnection,
    match_id: &MatchId,
    user_id: &UserId,
) -> RepoResult<Option<MatchPlayer>> {
    let result = sqlx::query_as::<_, MatchPlayerModel>(
        r#"
        SELECT id, match_id, position, user_id, display_name, team_id, confirmed, joined_at
        FROM match_players
        WHERE match_id = $1 AND user_id = $2
        "#,
    )
    .bind(match_id.as_str())
    .bind(user_id.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(MatchPlayer::from))
}

pub async fn fetch_player_by_position(
    conn: &mut PgConnection,
    match_id: &MatchId,
    position: u8,
) -> RepoResult<Option<MatchPlayer>> {
    let result = sqlx::query_as::<_, MatchPlayerModel>(
        r#"
        SELECT id, match_id, position, user_id, display_name, team_id, confirmed, joined_at
        FROM match_players
        WHERE match_id = $1 AND position = $2
        "#,
    )
    .bind(match_id.as_str())
    .bind(i16::from(position))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(MatchPlayer::from))
}

pub async fn insert_player(conn: &mut PgConnection, player: &MatchPlayer) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO match_players (id, match_id, position, user_id, display_name, team_id,
                                   confirmed, joined_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(player.id.as_str())
    .bind(player.match_id.as_str())
    .bind(i16::from(player.position))
    .bind(player.user_id.as_ref().map(UserId::as_str))
    .bind(player.display_name.as_deref())
    .bind(player.team_id.as_ref().map(TeamId::as_str))
    .bind(player.confirmed)
    .bind(player.joined_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInMatch))?;

    Ok(())
}

pub async fn update_player(conn: &mut PgConnection, player: &MatchPlayer) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE match_players
        SET user_id = $2, display_name = $3, team_id = $4, confirmed = $5, joined_at = $6
        WHERE id = $1
        "#,
    )
    .bind(player.id.as_str())
    .bind(player.user_id.as_ref().map(UserId::as_str))
    .bind(player.display_name.as_deref())
    .bind(player.team_id.as_ref().map(TeamId::as_str))
    .bind(player.confirmed)
    .bind(player.joined_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInMatch))?;

    if result.rows_affected() == 0 {
        return Err(player_not_found(&player.id));
    }

    Ok(())
}

pub async fn confirm_all_players(conn: &mut PgConnection, match_id: &MatchId) -> RepoResult<u64> {
    let result = sqlx::query(
        r#"
        UPDATE match_players
        SET confirmed = TRUE
        WHERE match_id = $1 AND confirmed = FALSE
        "#,
    )
    .bind(match_id.as_str())
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected())
}

pub async fn count_players(conn: &mut PgConnection, match_id: &MatchId, filter: &PlayerFilter) -> RepoResult<i64> {
    let positions: Option<Vec<i16>> = filter
        .positions
        .as_ref()
        .map(|ps| ps.iter().copied().map(i16::from).collect());

    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM match_players
        WHERE match_id = $1
          AND ($2::SMALLINT[] IS NULL OR position = ANY($2))
          AND ($3::BOOLEAN IS NULL OR confirmed = $3)
        "#,
    )
    .bind(match_id.as_str())
    .bind(positions)
    .bind(filter.confirmed)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_db_error)
}

// ============================================================================
// Teams
// ============================================================================

pub async fn insert_team(conn: &mut PgConnection, team: &Team) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO teams (id, match_id, team_key, label)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(team.id.as_str())
    .bind(team.match_id.as_str())
    .bind(team.key.as_str())
    .bind(&team.label)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

pub async fn fetch_team(conn: &mut PgConnection, id: &TeamId) -> RepoResult<Option<Team>> {
    let result = sqlx::query_as::<_, TeamModel>(
        r#"
        SELECT id, match_id, team_key, label
        FROM teams
        WHERE id = $1
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(Team::from))
}

pub async fn update_team(conn: &mut PgConnection, team: &Team) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE teams
        SET label = $2
        WHERE id = $1
        "#,
    )
    .bind(team.id.as_str())
    .bind(&team.label)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(team_not_found(&team.id));
    }

    Ok(())
}

// ============================================================================
// Invitations
// ============================================================================

pub async fn insert_invitation(conn: &mut PgConnection, invitation: &Invitation) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO invitations (id, match_id, position, email, token, expires_at, accepted, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(invitation.id.as_str())
    .bind(invitation.match_id.as_str())
    .bind(i16::from(invitation.position))
    .bind(&invitation.email)
    .bind(&invitation.token)
    .bind(invitation.expires_at)
    .bind(invitation.accepted)
    .bind(invitation.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        map_unique_violation(e, || {
            DomainError::ValidationError("invitation token already used in this match".to_string())
        })
    })?;

    Ok(())
}

pub async fn fetch_invitation(
    conn: &mut PgConnection,
    match_id: &MatchId,
    token: &str,
) -> RepoResult<Option<Invitation>> {
    let result = sqlx::query_as::<_, InvitationModel>(
        r#"
        SELECT id, match_id, position, email, token, expires_at, accepted, created_at
        FROM invitations
        WHERE match_id = $1 AND token = $2
        FOR UPDATE
        "#,
    )
    .bind(match_id.as_str())
    .bind(token)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.map(Invitation::from))
}

pub async fn update_invitation(conn: &mut PgConnection, invitation: &Invitation) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE invitations
        SET accepted = $2, expires_at = $3
        WHERE id = $1
        "#,
    )
    .bind(invitation.id.as_str())
    .bind(invitation.accepted)
    .bind(invitation.expires_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(invitation_not_found());
    }

    Ok(())
}
