//! MatchPlayer entity <-> model mapper

use padel_core::entities::MatchPlayer;
use padel_core::value_objects::{MatchId, PlayerId, TeamId, UserId};

use crate::models::MatchPlayerModel;

/// Convert MatchPlayerModel to MatchPlayer entity
impl From<MatchPlayerModel> for MatchPlayer {
    fn from(model: MatchPlayerModel) -> Self {
        MatchPlayer {
            id: PlayerId::new(model.id),
            match_id: MatchId::new(model.match_id),
            position: model.position as u8,
            user_id: model.user_id.map(UserId::new),
            display_name: model.display_name,
            team_id: model.team_id.map(TeamId::new),
            confirmed: model.confirmed,
            joined_at: model.joined_at,
        }
    }
}
