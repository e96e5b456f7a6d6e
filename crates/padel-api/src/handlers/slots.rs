//! Slot handlers
//!
//! Join-link preview and slot occupancy changes.

use axum::{extract::State, Json};
use padel_service::dto::{MatchResponse, ReleaseSlotRequest, RenameSlotRequest, SlotPreviewResponse};
use padel_service::SlotService;

use crate::extractors::{AuthUser, OptionalAuthUser, OptionalValidatedJson, PlayerIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Preview a join link
///
/// GET /slots/{player_id}
pub async fn get_slot(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    PlayerIdPath(player_id): PlayerIdPath,
) -> ApiResult<Json<SlotPreviewResponse>> {
    let service = SlotService::new(state.service_context());
    let preview = service.get_slot(&player_id, viewer.user_id()).await?;
    Ok(Json(preview))
}

/// Rename a placeholder slot
///
/// PATCH /slots/{player_id}
pub async fn rename_placeholder(
    State(state): State<AppState>,
    auth: AuthUser,
    PlayerIdPath(player_id): PlayerIdPath,
    ValidatedJson(request): ValidatedJson<RenameSlotRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = SlotService::new(state.service_context());
    let view = service.rename_placeholder(&auth.principal, &player_id, request).await?;
    Ok(Json(view))
}

/// Claim an open slot
///
/// POST /slots/{player_id}/join
pub async fn join_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    PlayerIdPath(player_id): PlayerIdPath,
) -> ApiResult<Json<MatchResponse>> {
    let service = SlotService::new(state.service_context());
    let view = service.join_slot(&auth.principal, &player_id).await?;
    Ok(Json(view))
}

/// Free a slot; the body may name the placeholder left behind
///
/// POST /slots/{player_id}/release
pub async fn release_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    PlayerIdPath(player_id): PlayerIdPath,
    OptionalValidatedJson(request): OptionalValidatedJson<ReleaseSlotRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let service = SlotService::new(state.service_context());
    let view = service
        .release_slot(&auth.principal, &player_id, request.unwrap_or_default())
        .await?;
    Ok(Json(view))
}
