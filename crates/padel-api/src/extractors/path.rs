//! Path parameter extractors
//!
//! Typed ids taken from the route. Ids are opaque strings; only blank
//! values are rejected here.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use padel_core::value_objects::{MatchId, PlayerId, TeamId};
use serde::Deserialize;

use crate::response::ApiError;

async fn extract<S, T>(parts: &mut Parts, state: &S) -> Result<T, ApiError>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned + Send,
{
    let Path(inner) = Path::<T>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_path(e.to_string()))?;
    Ok(inner)
}

fn non_blank(value: String, name: &str) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_path(format!("{name} must not be empty")));
    }
    Ok(value)
}

/// `/matches/:match_id`
#[derive(Debug, Clone)]
pub struct MatchIdPath(pub MatchId);

#[derive(Deserialize)]
struct MatchParams {
    match_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for MatchIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: MatchParams = extract(parts, state).await?;
        Ok(Self(MatchId::new(non_blank(params.match_id, "match_id")?)))
    }
}

/// `/slots/:player_id`
#[derive(Debug, Clone)]
pub struct PlayerIdPath(pub PlayerId);

#[derive(Deserialize)]
struct PlayerParams {
    player_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for PlayerIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: PlayerParams = extract(parts, state).await?;
        Ok(Self(PlayerId::new(non_blank(params.player_id, "player_id")?)))
    }
}

/// `/matches/:match_id/teams/:team_id`
#[derive(Debug, Clone)]
pub struct MatchTeamPath {
    pub match_id: MatchId,
    pub team_id: TeamId,
}

#[derive(Deserialize)]
struct MatchTeamParams {
    match_id: String,
    team_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for MatchTeamPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params: MatchTeamParams = extract(parts, state).await?;
        Ok(Self {
            match_id: MatchId::new(non_blank(params.match_id, "match_id")?),
            team_id: TeamId::new(non_blank(params.team_id, "team_id")?),
        })
    }
}
