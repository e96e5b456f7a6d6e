//! Match entity <-> model mapper

use padel_core::entities::{Match, MatchFormat, MatchStatus, MatchType};
use padel_core::value_objects::{MatchId, UserId};
use tracing::warn;

use crate::models::MatchModel;

/// Convert database status string to MatchStatus
pub fn parse_status(value: &str) -> MatchStatus {
    MatchStatus::parse(value).unwrap_or_else(|| {
        warn!(status = value, "Unknown match status in database");
        MatchStatus::default()
    })
}

/// Convert database match type string to MatchType
pub fn parse_match_type(value: &str) -> MatchType {
    MatchType::parse(value).unwrap_or_else(|| {
        warn!(match_type = value, "Unknown match type in database");
        MatchType::default()
    })
}

/// Convert database format string to MatchFormat
pub fn parse_format(value: &str) -> MatchFormat {
    MatchFormat::parse(value).unwrap_or_else(|| {
        warn!(format = value, "Unknown match format in database");
        MatchFormat::default()
    })
}

/// Convert MatchModel to Match entity
impl From<MatchModel> for Match {
    fn from(model: MatchModel) -> Self {
        Match {
            id: MatchId::new(model.id),
            creator_id: UserId::new(model.creator_id),
            status: parse_status(&model.status),
            sets: model.sets as u8,
            match_type: parse_match_type(&model.match_type),
            format: parse_format(&model.format),
            counts_for_ranking: model.counts_for_ranking,
            club: model.club,
            court_number: model.court_number,
            notes: model.notes,
            score: model.score,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
