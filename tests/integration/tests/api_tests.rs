//! API Integration Tests
//!
//! Each test spawns its own server on the in-memory store; no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer, TEST_BASE_URL,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create(server: &TestServer, token: &str, body: &Value) -> CreatedMatch {
    let response = server.post_auth("/api/v1/matches", token, body).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn view(server: &TestServer, match_id: &str, token: &str) -> MatchView {
    let response = server
        .get_auth(&format!("/api/v1/matches/{match_id}"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["store"], true);
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/users/@me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/v1/users/@me", "not-a-jwt").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_session_sync_then_profile() {
    let server = TestServer::start().await.unwrap();
    let token = server.token_for("ana").unwrap();

    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let token = server.sign_in("ana").await.unwrap();
    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let me: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me["id"], "ana");
    assert_eq!(me["display_name"], "Ana");
    assert_eq!(me["email"], "ana@club.es");
}

#[tokio::test]
async fn test_search_players() {
    let server = TestServer::start().await.unwrap();
    let token = server.sign_in("ana").await.unwrap();
    server.sign_in("marta").await.unwrap();

    let response = server.get_auth("/api/v1/players?q=mar", &token).await.unwrap();
    let found: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], "marta");
}

// ============================================================================
// Match Tests
// ============================================================================

#[tokio::test]
async fn test_create_match_returns_links() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();

    let created = create(&server, &ana, &doubles_with_placeholders("ana")).await;
    assert_eq!(created.share_link, format!("{TEST_BASE_URL}/m/{}", created.match_id));
    assert_eq!(created.join_links.len(), 3);
    assert!(created
        .join_links
        .iter()
        .all(|j| j.link == format!("{TEST_BASE_URL}/j/{}", j.player_id)));

    let view = view(&server, &created.match_id, &ana).await;
    assert_eq!(view.status, "PENDING");
    assert!(view.viewer.is_creator);
    assert_eq!(view.slot(0).user_id.as_deref(), Some("ana"));
    assert_eq!(view.slot(1).display_name, "Bea");
    assert_eq!(view.slot(1).state, "free");
}

#[tokio::test]
async fn test_create_requires_creator_in_anchor_slot() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    server.sign_in("luis").await.unwrap();

    let response = server
        .post_auth("/api/v1/matches", &ana, &doubles_with_placeholders("luis"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "CREATOR_NOT_IN_ANCHOR_SLOT");
}

#[tokio::test]
async fn test_create_rejects_missing_position() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let body = json!({
        "sets": 3,
        "format": "DOUBLES",
        "slots": [
            { "position": 0, "kind": "user", "user_id": "ana" },
            { "position": 1, "kind": "placeholder", "display_name": "Bea" },
            { "position": 1, "kind": "placeholder", "display_name": "Carla" },
            { "position": 3, "kind": "placeholder", "display_name": "Dani" },
        ],
    });

    let response = server.post_auth("/api/v1/matches", &ana, &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth("/api/v1/matches", &ana).await.unwrap();
    let mine: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(mine.is_empty());
}

#[tokio::test]
async fn test_unknown_match_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/matches/does-not-exist").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_MATCH");
}

#[tokio::test]
async fn test_update_details_and_rename_team() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let bea = server.sign_in("bea").await.unwrap();
    let created = create(&server, &ana, &doubles_with_placeholders("ana")).await;
    let path = format!("/api/v1/matches/{}", created.match_id);

    let response = server
        .patch_auth(&path, &ana, &json!({ "court_number": " 4 ", "club": "" }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["court_number"], "4");
    assert!(body["club"].is_null());

    let response = server.patch_auth(&path, &bea, &json!({ "notes": "x" })).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_MATCH_CREATOR");

    let current = view(&server, &created.match_id, &ana).await;
    let team_a = current.teams.iter().find(|t| t.key == "A").unwrap();
    let response = server
        .patch_auth(
            &format!("{path}/teams/{}", team_a.id),
            &ana,
            &json!({ "label": "Los Bravos" }),
        )
        .await
        .unwrap();
    let renamed: MatchView = assert_json(response, StatusCode::OK).await.unwrap();
    let label = renamed.teams.iter().find(|t| t.key == "A").map(|t| t.label.as_str());
    assert_eq!(label, Some("Los Bravos"));
}

// ============================================================================
// Slot and Result Tests
// ============================================================================

#[tokio::test]
async fn test_doubles_flow_to_confirmed() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let bea = server.sign_in("bea").await.unwrap();
    let carla = server.sign_in("carla").await.unwrap();
    let dani = server.sign_in("dani").await.unwrap();
    let created = create(&server, &ana, &doubles_with_placeholders("ana")).await;
    let slot_at = |position: u8| {
        created
            .join_links
            .iter()
            .find(|j| j.position == position)
            .map(|j| j.player_id.clone())
            .unwrap()
    };

    // Anonymous preview cannot join
    let response = server.get(&format!("/api/v1/slots/{}", slot_at(1))).await.unwrap();
    let preview: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(preview["can_join"], false);
    assert_eq!(preview["blocked_by"], "not_signed_in");

    for (token, position) in [(&bea, 1), (&carla, 2)] {
        let response = server
            .post_empty(&format!("/api/v1/slots/{}/join", slot_at(position)), token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    // Taken slot
    let response = server
        .post_empty(&format!("/api/v1/slots/{}/join", slot_at(1)), &dani)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "SLOT_OCCUPIED");

    let result = format!("/api/v1/matches/{}/result", created.match_id);
    let response = server.post_auth(&result, &ana, &score("6-4, 3-6, 6-2")).await.unwrap();
    let after_ana: MatchView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(after_ana.status, "PENDING");
    assert_eq!(after_ana.score.as_deref(), Some("6-4, 3-6, 6-2"));

    let response = server.post_auth(&result, &carla, &score("6-4, 3-6, 6-2")).await.unwrap();
    let after_carla: MatchView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(after_carla.status, "CONFIRMED");

    // Closed matches refuse new players
    let response = server
        .post_empty(&format!("/api/v1/slots/{}/join", slot_at(3)), &dani)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "MATCH_CLOSED");
}

#[tokio::test]
async fn test_result_requires_participant_and_valid_score() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let outsider = server.sign_in("zoe").await.unwrap();
    let created = create(&server, &ana, &doubles_with_placeholders("ana")).await;
    let result = format!("/api/v1/matches/{}/result", created.match_id);

    let response = server.post_auth(&result, &outsider, &score("6-4")).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_PARTICIPANT");

    let response = server.post_auth(&result, &ana, &score("6:4")).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_SCORE");

    let response = server
        .post_empty(&format!("/api/v1/matches/{}/confirm", created.match_id), &ana)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "MISSING_SCORE");
}

#[tokio::test]
async fn test_release_slot_keeps_name() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let bea = server.sign_in("bea").await.unwrap();
    let created = create(&server, &ana, &doubles_with_placeholders("ana")).await;
    let slot = &created.join_links[0].player_id;

    server
        .post_empty(&format!("/api/v1/slots/{slot}/join"), &bea)
        .await
        .unwrap();

    let response = server
        .post_empty(&format!("/api/v1/slots/{slot}/release"), &bea)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_empty(&format!("/api/v1/slots/{slot}/release"), &ana)
        .await
        .unwrap();
    let released: MatchView = assert_json(response, StatusCode::OK).await.unwrap();
    let freed = released.slots.iter().find(|s| &s.id == slot).unwrap();
    assert_eq!(freed.state, "free");
    assert_eq!(freed.display_name, "Bea");
    assert!(freed.user_id.is_none());
}

#[tokio::test]
async fn test_finalize_by_creator() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let created = create(&server, &ana, &doubles_with_placeholders("ana")).await;
    let base = format!("/api/v1/matches/{}", created.match_id);

    let response = server.post_empty(&format!("{base}/finalize"), &ana).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "MISSING_SCORE");

    server.post_auth(&format!("{base}/result"), &ana, &score("7-5")).await.unwrap();
    let response = server.post_empty(&format!("{base}/finalize"), &ana).await.unwrap();
    let finalized: MatchView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(finalized.status, "CONFIRMED");
    assert!(finalized.slots.iter().all(|s| s.state != "claimed"));
}

// ============================================================================
// Invitation Tests
// ============================================================================

#[tokio::test]
async fn test_accept_invitation() {
    let server = TestServer::start().await.unwrap();
    let ana = server.sign_in("ana").await.unwrap();
    let vero = server.sign_in("vero").await.unwrap();
    let created = create(&server, &ana, &doubles_with_invite("ana", "vero@club.es", "T")).await;
    assert_eq!(created.invitation_links.len(), 1);
    assert_eq!(created.invitation_links[0].position, 2);
    assert!(created.invitation_links[0].link.ends_with(&format!("/m/{}?token=T", created.match_id)));

    let accept = format!("/api/v1/matches/{}/invitations/accept", created.match_id);
    let response = server.post_auth(&accept, &vero, &json!({ "token": "T" })).await.unwrap();
    let accepted: MatchView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.slot(2).user_id.as_deref(), Some("vero"));
    assert_eq!(accepted.slot(2).state, "confirmed");
    assert!(accepted.viewer.is_participant);

    let response = server.post_auth(&accept, &vero, &json!({ "token": "T" })).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVITATION_ALREADY_ACCEPTED");

    let response = server.post_auth(&accept, &vero, &json!({ "token": "nope" })).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
