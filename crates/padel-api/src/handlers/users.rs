//! User handlers

use axum::{extract::State, Json};
use padel_service::dto::{PublicUserResponse, SearchPlayersQuery, UserResponse};
use padel_service::UserService;

use crate::extractors::{AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_current_user(auth.user_id()).await?;
    Ok(Json(user))
}

/// Search players to fill slots
///
/// GET /players?q=&limit=
pub async fn search_players(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<SearchPlayersQuery>,
) -> ApiResult<Json<Vec<PublicUserResponse>>> {
    let service = UserService::new(state.service_context());
    let players = service.search_players(&query.q, query.limit).await?;
    Ok(Json(players))
}
