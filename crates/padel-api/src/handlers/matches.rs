//! Match handlers
//!
//! Creation, viewing, details, results, team labels and invitations.

use axum::{extract::State, Json};
use padel_service::dto::{
    AcceptInvitationRequest, CreateMatchRequest, CreateMatchResponse, ListMatchesQuery, MatchResponse,
    MatchSummaryResponse, RenameTeamRequest, SubmitResultRequest, UpdateMatchRequest,
};
use padel_service::{InvitationService, MatchService, ResultService, TeamService};

use crate::extractors::{
    AuthUser, JsonBody, MatchIdPath, MatchTeamPath, OptionalAuthUser, QueryParams, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a match
///
/// POST /matches
pub async fn create_match(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<CreateMatchRequest>,
) -> ApiResult<Created<Json<CreateMatchResponse>>> {
    let service = MatchService::new(state.service_context());
    let created = service.create_match(&auth.principal, request).await?;
    Ok(Created(Json(created)))
}

/// List the caller's matches
///
/// GET /matches?limit=
pub async fn list_my_matches(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<ListMatchesQuery>,
) -> ApiResult<Json<Vec<MatchSummaryResponse>>> {
    let service = MatchService::new(state.service_context());
    let matches = service.list_my_matches(auth.user_id(), query.limit).await?;
    Ok(Json(matches))
}

/// Get a match, with capabilities for the signed-in viewer if any
///
/// GET /matches/{match_id}
pub async fn get_match(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    MatchIdPath(match_id): MatchIdPath,
) -> ApiResult<Json<MatchResponse>> {
    let service = MatchService::new(state.service_context());
    let view = service.get_match(&match_id, viewer.user_id()).await?;
    Ok(Json(view))
}

/// Update club, court and notes
///
/// PATCH /matches/{match_id}
pub async fn update_match(
    State(state): State<AppState>,
    auth: AuthUser,
    MatchIdPath(match_id): MatchIdPath,
    ValidatedJson(request): ValidatedJson<UpdateMatchRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = MatchService::new(state.service_context());
    let view = service.update_details(&auth.principal, &match_id, request).await?;
    Ok(Json(view))
}

/// Submit the score
///
/// POST /matches/{match_id}/result
pub async fn submit_result(
    State(state): State<AppState>,
    auth: AuthUser,
    MatchIdPath(match_id): MatchIdPath,
    ValidatedJson(request): ValidatedJson<SubmitResultRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = ResultService::new(state.service_context());
    let view = service.submit_result(&auth.principal, &match_id, request).await?;
    Ok(Json(view))
}

/// Confirm the recorded score
///
/// POST /matches/{match_id}/confirm
pub async fn confirm_result(
    State(state): State<AppState>,
    auth: AuthUser,
    MatchIdPath(match_id): MatchIdPath,
) -> ApiResult<Json<MatchResponse>> {
    let service = ResultService::new(state.service_context());
    let view = service.confirm_result(&auth.principal, &match_id).await?;
    Ok(Json(view))
}

/// Close the match as confirmed
///
/// POST /matches/{match_id}/finalize
pub async fn finalize_match(
    State(state): State<AppState>,
    auth: AuthUser,
    MatchIdPath(match_id): MatchIdPath,
) -> ApiResult<Json<MatchResponse>> {
    let service = ResultService::new(state.service_context());
    let view = service.finalize_match(&auth.principal, &match_id).await?;
    Ok(Json(view))
}

/// Relabel a team
///
/// PATCH /matches/{match_id}/teams/{team_id}
pub async fn rename_team(
    State(state): State<AppState>,
    auth: AuthUser,
    path: MatchTeamPath,
    ValidatedJson(request): ValidatedJson<RenameTeamRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = TeamService::new(state.service_context());
    let view = service
        .rename_team(&auth.principal, &path.match_id, &path.team_id, request)
        .await?;
    Ok(Json(view))
}

/// Accept an email invitation
///
/// POST /matches/{match_id}/invitations/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    MatchIdPath(match_id): MatchIdPath,
    ValidatedJson(request): ValidatedJson<AcceptInvitationRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = InvitationService::new(state.service_context());
    let view = service.accept_invitation(&auth.principal, &match_id, request).await?;
    Ok(Json(view))
}
