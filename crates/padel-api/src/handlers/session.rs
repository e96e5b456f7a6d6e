//! Session handler
//!
//! Called by the client right after sign-in so the local user record
//! mirrors the identity provider.

use axum::{extract::State, Json};
use padel_service::{dto::UserResponse, UserService};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Sync the signed-in principal
///
/// POST /session
pub async fn sync_session(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.sync_principal(&auth.principal).await?;
    Ok(Json(user))
}
