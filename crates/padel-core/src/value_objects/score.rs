//! Score value object
//!
//! The persisted representation is a comma-separated list of
//! `<teamAGames>-<teamBGames>` pairs, e.g. `"6-4, 3-6, 10-7"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::TeamKey;

/// Fewest sets a match may be played over
pub const MIN_SETS: u8 = 1;

/// Most sets a match may be played over
pub const MAX_SETS: u8 = 5;

/// Games won by each side in one set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetScore {
    pub team_a: u16,
    pub team_b: u16,
}

impl SetScore {
    pub const fn new(team_a: u16, team_b: u16) -> Self {
        Self { team_a, team_b }
    }

    /// Side that took the set, `None` when the games are level
    pub fn winner(&self) -> Option<TeamKey> {
        match self.team_a.cmp(&self.team_b) {
            std::cmp::Ordering::Greater => Some(TeamKey::A),
            std::cmp::Ordering::Less => Some(TeamKey::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team_a, self.team_b)
    }
}

/// Error when parsing a score string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreParseError {
    #[error("score is empty")]
    Empty,

    #[error("set {index} is not a `games-games` pair: {segment:?}")]
    MalformedSet { index: usize, segment: String },

    #[error("a score can have at most {max} sets")]
    TooManySets { max: u8 },
}

/// Ordered per-set results of a match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Score {
    sets: Vec<SetScore>,
}

impl Score {
    pub fn new(sets: Vec<SetScore>) -> Self {
        Self { sets }
    }

    /// Parse the persisted representation
    pub fn parse(input: &str) -> Result<Self, ScoreParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ScoreParseError::Empty);
        }

        let sets = trimmed
            .split(',')
            .enumerate()
            .map(|(index, segment)| parse_set(index + 1, segment))
            .collect::<Result<Vec<_>, _>>()?;

        if sets.len() > usize::from(MAX_SETS) {
            return Err(ScoreParseError::TooManySets { max: MAX_SETS });
        }

        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[SetScore] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Sets won by (team A, team B)
    pub fn set_wins(&self) -> (usize, usize) {
        self.sets
            .iter()
            .fold((0, 0), |(a, b), set| match set.winner() {
                Some(TeamKey::A) => (a + 1, b),
                Some(TeamKey::B) => (a, b + 1),
                None => (a, b),
            })
    }

    /// Side with more sets won, `None` on a tie
    pub fn winner(&self) -> Option<TeamKey> {
        let (a, b) = self.set_wins();
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(TeamKey::A),
            std::cmp::Ordering::Less => Some(TeamKey::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

fn parse_set(index: usize, segment: &str) -> Result<SetScore, ScoreParseError> {
    let malformed = || ScoreParseError::MalformedSet {
        index,
        segment: segment.trim().to_string(),
    };

    let (a, b) = segment.split_once('-').ok_or_else(malformed)?;
    let parse_games = |raw: &str| {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        raw.parse::<u16>().map_err(|_| malformed())
    };

    Ok(SetScore::new(parse_games(a)?, parse_games(b)?))
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{set}")?;
        }
        Ok(())
    }
}

impl FromStr for Score {
    type Err = ScoreParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Score::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let score = Score::parse("6-4, 3-6, 10-7").unwrap();
        assert_eq!(
            score.sets(),
            &[SetScore::new(6, 4), SetScore::new(3, 6), SetScore::new(10, 7)]
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let score = Score::new(vec![SetScore::new(7, 5), SetScore::new(6, 7)]);
        let rendered = score.to_string();
        assert_eq!(rendered, "7-5, 6-7");
        assert_eq!(Score::parse(&rendered).unwrap(), score);
    }

    #[test]
    fn test_lenient_whitespace_is_canonicalized() {
        let score = Score::parse(" 6 - 4,3-6 ").unwrap();
        assert_eq!(score.to_string(), "6-4, 3-6");
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_eq!(Score::parse("   "), Err(ScoreParseError::Empty));
        assert!(matches!(
            Score::parse("6-4, abc"),
            Err(ScoreParseError::MalformedSet { index: 2, .. })
        ));
        assert!(Score::parse("6-4,").is_err());
        assert!(Score::parse("6-4-2").is_err());
        assert!(Score::parse("-6-4").is_err());
    }

    #[test]
    fn test_rejects_more_than_max_sets() {
        let err = Score::parse("6-0, 6-0, 6-0, 6-0, 6-0, 6-0").unwrap_err();
        assert_eq!(err, ScoreParseError::TooManySets { max: MAX_SETS });
    }

    #[test]
    fn test_set_wins_and_winner() {
        let score = Score::parse("6-4, 3-6, 6-2").unwrap();
        assert_eq!(score.set_wins(), (2, 1));
        assert_eq!(score.winner(), Some(TeamKey::A));

        let level = Score::parse("6-4, 4-6").unwrap();
        assert_eq!(level.winner(), None);

        assert_eq!(SetScore::new(5, 5).winner(), None);
    }
}
