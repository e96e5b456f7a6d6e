//! Team entity <-> model mapper

use padel_core::entities::{Team, TeamKey};
use padel_core::value_objects::{MatchId, TeamId};
use tracing::warn;

use crate::models::TeamModel;

/// Convert database team key string to TeamKey
pub fn parse_team_key(value: &str) -> TeamKey {
    TeamKey::parse(value).unwrap_or_else(|| {
        warn!(team_key = value, "Unknown team key in database");
        TeamKey::A
    })
}

/// Convert TeamModel to Team entity
impl From<TeamModel> for Team {
    fn from(model: TeamModel) -> Self {
        Team {
            id: TeamId::new(model.id),
            match_id: MatchId::new(model.match_id),
            key: parse_team_key(&model.team_key),
            label: model.label,
        }
    }
}
