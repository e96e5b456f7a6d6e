//! Route definitions
//!
//! API routes are mounted under /api/v1; health probes live at the root.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{health, matches, session, slots, users};
use crate::state::AppState;

/// Create the API router (health probes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(match_routes())
        .merge(slot_routes())
}

/// Session and user routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(session::sync_session))
        .route("/users/@me", get(users::get_current_user))
        .route("/players", get(users::search_players))
}

/// Match routes
fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/matches", post(matches::create_match).get(matches::list_my_matches))
        .route("/matches/:match_id", get(matches::get_match).patch(matches::update_match))
        .route("/matches/:match_id/result", post(matches::submit_result))
        .route("/matches/:match_id/confirm", post(matches::confirm_result))
        .route("/matches/:match_id/finalize", post(matches::finalize_match))
        .route("/matches/:match_id/teams/:team_id", patch(matches::rename_team))
        .route("/matches/:match_id/invitations/accept", post(matches::accept_invitation))
}

/// Slot routes
fn slot_routes() -> Router<AppState> {
    Router::new()
        .route("/slots/:player_id", get(slots::get_slot).patch(slots::rename_placeholder))
        .route("/slots/:player_id/join", post(slots::join_slot))
        .route("/slots/:player_id/release", post(slots::release_slot))
}
