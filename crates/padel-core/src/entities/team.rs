//! Team entity - the labelled A/B grouping of slots

use serde::{Deserialize, Serialize};

use super::padel_match::MatchFormat;
use crate::value_objects::{MatchId, TeamId};

/// Maximum length of a team label, in characters
pub const MAX_LABEL_LEN: usize = 40;

/// Side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamKey {
    A,
    B,
}

impl TeamKey {
    pub const ALL: [TeamKey; 2] = [TeamKey::A, TeamKey::B];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Label used when the creator leaves it blank
    pub fn default_label(self, format: MatchFormat) -> &'static str {
        match (format, self) {
            (MatchFormat::Doubles, Self::A) => "Pareja A",
            (MatchFormat::Doubles, Self::B) => "Pareja B",
            (MatchFormat::Singles, Self::A) => "Jugador A",
            (MatchFormat::Singles, Self::B) => "Jugador B",
        }
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub match_id: MatchId,
    pub key: TeamKey,
    pub label: String,
}

impl Team {
    /// Create a team, sanitizing the requested label
    pub fn new(id: TeamId, match_id: MatchId, key: TeamKey, format: MatchFormat, label: Option<&str>) -> Self {
        Self {
            id,
            match_id,
            key,
            label: sanitize_label(label, key, format),
        }
    }
}

/// Trim, collapse inner whitespace and cap the length of a label.
/// Blank input yields the default label of the side.
pub fn sanitize_label(raw: Option<&str>, key: TeamKey, format: MatchFormat) -> String {
    let collapsed = raw
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if collapsed.is_empty() {
        return key.default_label(format).to_string();
    }
    collapsed.chars().take(MAX_LABEL_LEN).collect::<String>().trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        assert_eq!(TeamKey::A.default_label(MatchFormat::Doubles), "Pareja A");
        assert_eq!(TeamKey::B.default_label(MatchFormat::Singles), "Jugador B");
    }

    #[test]
    fn test_sanitize_label() {
        let f = MatchFormat::Doubles;
        assert_eq!(sanitize_label(Some("  Los   Bravos "), TeamKey::A, f), "Los Bravos");
        assert_eq!(sanitize_label(Some("   "), TeamKey::B, f), "Pareja B");
        assert_eq!(sanitize_label(None, TeamKey::A, MatchFormat::Singles), "Jugador A");

        let long = "x".repeat(60);
        assert_eq!(sanitize_label(Some(&long), TeamKey::A, f).chars().count(), MAX_LABEL_LEN);
    }

    #[test]
    fn test_key_text() {
        assert_eq!(TeamKey::parse(TeamKey::B.as_str()), Some(TeamKey::B));
        assert_eq!(TeamKey::A.opponent(), TeamKey::B);
    }
}
