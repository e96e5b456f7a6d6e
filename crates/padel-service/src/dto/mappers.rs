//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that need links or the viewer are built from small view
//! structs bundling those inputs.

use padel_core::entities::{Match, MatchDetails, MatchPlayer, Team, User};
use padel_core::lifecycle::{JoinBlocker, ViewerCapabilities};
use padel_core::value_objects::{LinkBuilder, Score, SetScore, UserId};

use super::responses::{
    JoinBlockReason, MatchResponse, MatchSummaryResponse, PublicUserResponse, ScoreResponse,
    SetResponse, SlotResponse, SlotState, TeamResponse, UserResponse, ViewerResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            image: user.image.clone(),
            level: user.level,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name.clone(),
            image: user.image.clone(),
            level: user.level,
        }
    }
}

// ============================================================================
// Score Mappers
// ============================================================================

impl From<&SetScore> for SetResponse {
    fn from(set: &SetScore) -> Self {
        Self {
            team_a: set.team_a,
            team_b: set.team_b,
            winner: set.winner(),
        }
    }
}

impl From<&Score> for ScoreResponse {
    fn from(score: &Score) -> Self {
        let (sets_won_a, sets_won_b) = score.set_wins();
        Self {
            sets: score.sets().iter().map(SetResponse::from).collect(),
            sets_won_a,
            sets_won_b,
            winner: score.winner(),
        }
    }
}

// ============================================================================
// Match Mappers
// ============================================================================

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            key: team.key,
            label: team.label.clone(),
        }
    }
}

impl From<ViewerCapabilities> for ViewerResponse {
    fn from(caps: ViewerCapabilities) -> Self {
        Self {
            is_creator: caps.is_creator,
            is_participant: caps.is_participant,
            viewer_confirmed: caps.viewer_confirmed,
            can_submit_result: caps.can_submit_result,
            can_confirm_result: caps.can_confirm_result,
        }
    }
}

impl From<JoinBlocker> for JoinBlockReason {
    fn from(blocker: JoinBlocker) -> Self {
        match blocker {
            JoinBlocker::MatchClosed => Self::MatchClosed,
            JoinBlocker::SlotTaken => Self::SlotTaken,
            JoinBlocker::AlreadyInMatch => Self::AlreadyInMatch,
        }
    }
}

/// A slot rendered within its match
pub struct SlotView<'a> {
    pub details: &'a MatchDetails,
    pub player: &'a MatchPlayer,
}

impl From<SlotView<'_>> for SlotResponse {
    fn from(view: SlotView<'_>) -> Self {
        let SlotView { details, player } = view;
        let format = details.record.format;
        let state = match (player.is_claimed(), player.confirmed) {
            (false, _) => SlotState::Free,
            (true, false) => SlotState::Claimed,
            (true, true) => SlotState::Confirmed,
        };

        Self {
            id: player.id.to_string(),
            position: player.position,
            team: format.team_for_position(player.position),
            index_in_team: format.index_in_team(player.position),
            display_name: details.slot_name(player),
            user_id: player.user_id.as_ref().map(ToString::to_string),
            state,
            joined_at: player.joined_at,
        }
    }
}

/// A match as seen by one (possibly anonymous) viewer
pub struct MatchView<'a> {
    pub details: &'a MatchDetails,
    pub viewer: Option<&'a UserId>,
    pub links: &'a LinkBuilder,
}

impl From<MatchView<'_>> for MatchResponse {
    fn from(view: MatchView<'_>) -> Self {
        let MatchView {
            details,
            viewer,
            links,
        } = view;
        let record = &details.record;
        let result = record
            .score
            .as_deref()
            .and_then(|s| Score::parse(s).ok())
            .map(|s| ScoreResponse::from(&s));

        Self {
            id: record.id.to_string(),
            creator_id: record.creator_id.to_string(),
            status: record.status,
            sets: record.sets,
            match_type: record.match_type,
            format: record.format,
            counts_for_ranking: record.counts_for_ranking,
            club: record.club.clone(),
            court_number: record.court_number.clone(),
            notes: record.notes.clone(),
            score: record.score.clone(),
            result,
            teams: details.teams.iter().map(TeamResponse::from).collect(),
            slots: details
                .players
                .iter()
                .map(|player| SlotResponse::from(SlotView { details, player }))
                .collect(),
            share_link: links.match_link(record.id.as_str()),
            viewer: ViewerCapabilities::for_viewer(details, viewer).into(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A match summary with its share link
pub struct SummaryView<'a> {
    pub record: &'a Match,
    pub links: &'a LinkBuilder,
}

impl From<SummaryView<'_>> for MatchSummaryResponse {
    fn from(view: SummaryView<'_>) -> Self {
        let record = view.record;
        Self {
            id: record.id.to_string(),
            status: record.status,
            match_type: record.match_type,
            format: record.format,
            club: record.club.clone(),
            score: record.score.clone(),
            share_link: view.links.match_link(record.id.as_str()),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use padel_core::entities::{MatchFormat, MatchStatus, MatchType, TeamKey};
    use padel_core::value_objects::{MatchId, PlayerId};

    use super::*;

    fn singles_details() -> MatchDetails {
        let now = Utc::now();
        let match_id = MatchId::new("m1");
        let mut record = Match::new(
            match_id.clone(),
            UserId::new("ana"),
            3,
            MatchType::Friendly,
            MatchFormat::Singles,
            now,
        );
        record.score = Some("6-4, 3-6, 7-5".to_string());

        let mut anchor = MatchPlayer::for_user(PlayerId::new("p0"), match_id.clone(), 0, UserId::new("ana"));
        anchor.confirmed = true;
        let rival = MatchPlayer::placeholder(PlayerId::new("p1"), match_id, 1, "Luis".to_string());
        let ana = User::new(UserId::new("ana"), "Ana".to_string(), None, now);

        MatchDetails::new(record, vec![rival, anchor], Vec::new(), vec![ana])
    }

    #[test]
    fn test_match_response_for_participant() {
        let details = singles_details();
        let links = LinkBuilder::new(Some("https://padel.app"));
        let viewer = UserId::new("ana");

        let response = MatchResponse::from(MatchView {
            details: &details,
            viewer: Some(&viewer),
            links: &links,
        });

        assert_eq!(response.status, MatchStatus::Pending);
        assert_eq!(response.share_link, "https://padel.app/m/m1");
        assert_eq!(response.slots[0].display_name, "Ana");
        assert_eq!(response.slots[0].state, SlotState::Confirmed);
        assert_eq!(response.slots[1].display_name, "Luis");
        assert_eq!(response.slots[1].state, SlotState::Free);
        assert_eq!(response.slots[1].team, TeamKey::B);

        let result = response.result.unwrap();
        assert_eq!(result.sets.len(), 3);
        assert_eq!((result.sets_won_a, result.sets_won_b), (2, 1));
        assert_eq!(result.winner, Some(TeamKey::A));

        assert!(response.viewer.is_creator);
        assert!(response.viewer.can_submit_result);
        assert!(!response.viewer.can_confirm_result);
    }

    #[test]
    fn test_match_response_for_anonymous_viewer() {
        let details = singles_details();
        let links = LinkBuilder::default();

        let response = MatchResponse::from(MatchView {
            details: &details,
            viewer: None,
            links: &links,
        });

        assert!(!response.viewer.is_participant);
        assert!(!response.viewer.can_submit_result);
    }
}
