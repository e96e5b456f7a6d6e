//! Match entity - one scheduled contest and its closed enums

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::team::TeamKey;
use crate::value_objects::{MatchId, UserId};

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Pending,
    Confirmed,
    /// Reserved for contested results; never assigned automatically
    Disputed,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Disputed => "DISPUTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "DISPUTED" => Some(Self::Disputed),
            _ => None,
        }
    }
}

/// Match type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    #[default]
    Friendly,
    LocalTournament,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Friendly => "FRIENDLY",
            Self::LocalTournament => "LOCAL_TOURNAMENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FRIENDLY" => Some(Self::Friendly),
            "LOCAL_TOURNAMENT" => Some(Self::LocalTournament),
            _ => None,
        }
    }
}

/// Match format - decides how many slots exist and which team each belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchFormat {
    Singles,
    #[default]
    Doubles,
}

impl MatchFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singles => "SINGLES",
            Self::Doubles => "DOUBLES",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SINGLES" => Some(Self::Singles),
            "DOUBLES" => Some(Self::Doubles),
            _ => None,
        }
    }

    /// Number of slots in a match of this format
    pub fn player_count(self) -> u8 {
        match self {
            Self::Singles => 2,
            Self::Doubles => 4,
        }
    }

    /// Players per side
    pub fn team_size(self) -> u8 {
        self.player_count() / 2
    }

    /// Team a position belongs to
    pub fn team_for_position(self, position: u8) -> TeamKey {
        if position < self.team_size() {
            TeamKey::A
        } else {
            TeamKey::B
        }
    }

    /// Index of a position inside its team (0 or 1)
    pub fn index_in_team(self, position: u8) -> u8 {
        match self {
            Self::Singles => 0,
            Self::Doubles => position % 2,
        }
    }

    /// Positions that make up one team
    pub fn positions(self, team: TeamKey) -> std::ops::Range<u8> {
        let size = self.team_size();
        match team {
            TeamKey::A => 0..size,
            TeamKey::B => size..size * 2,
        }
    }
}

/// Match entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub creator_id: UserId,
    pub status: MatchStatus,
    pub sets: u8,
    pub match_type: MatchType,
    pub format: MatchFormat,
    pub counts_for_ranking: bool,
    pub club: Option<String>,
    pub court_number: Option<String>,
    pub notes: Option<String>,
    pub score: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Create a new pending match
    pub fn new(
        id: MatchId,
        creator_id: UserId,
        sets: u8,
        match_type: MatchType,
        format: MatchFormat,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            creator_id,
            status: MatchStatus::Pending,
            sets,
            match_type,
            format,
            counts_for_ranking: false,
            club: None,
            court_number: None,
            notes: None,
            score: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }

    /// Whether a non-blank score has been recorded
    pub fn has_score(&self) -> bool {
        self.score.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}
