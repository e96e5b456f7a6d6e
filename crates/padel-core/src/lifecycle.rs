//! Match lifecycle rules
//!
//! Pure functions deciding status transitions, slot occupancy and viewer
//! capabilities. Services load state inside a transaction, ask these rules
//! what to do, and write the outcome back in the same transaction.
//!
//! Two confirmation policies exist and each operation names the one it uses:
//!
//! | Operation      | Policy                            | When unsatisfied   |
//! |----------------|-----------------------------------|--------------------|
//! | SubmitResult   | [`ConfirmationPolicy::OnePerTeam`] | revert to PENDING  |
//! | ConfirmResult  | [`ConfirmationPolicy::AllPlayers`] | status unchanged   |
//! | FinalizeMatch  | none, forced                      | n/a                |
//!
//! `DISPUTED` is never entered automatically.

use crate::entities::{Match, MatchDetails, MatchFormat, MatchPlayer, MatchStatus, TeamKey, User};
use crate::error::DomainError;
use crate::value_objects::{UserId, MAX_SETS, MIN_SETS};

// ============================================================================
// Confirmation tally
// ============================================================================

/// Confirmed and total slot counts per team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfirmationTally {
    pub confirmed_a: u32,
    pub total_a: u32,
    pub confirmed_b: u32,
    pub total_b: u32,
}

impl ConfirmationTally {
    pub fn from_players(format: MatchFormat, players: &[MatchPlayer]) -> Self {
        players.iter().fold(Self::default(), |mut tally, p| {
            let (confirmed, total) = match format.team_for_position(p.position) {
                TeamKey::A => (&mut tally.confirmed_a, &mut tally.total_a),
                TeamKey::B => (&mut tally.confirmed_b, &mut tally.total_b),
            };
            *total += 1;
            if p.confirmed {
                *confirmed += 1;
            }
            tally
        })
    }

    /// (confirmed, total) of one team
    pub fn team(&self, key: TeamKey) -> (u32, u32) {
        match key {
            TeamKey::A => (self.confirmed_a, self.total_a),
            TeamKey::B => (self.confirmed_b, self.total_b),
        }
    }
}

/// Rule deciding whether enough slots have confirmed a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    /// At least one confirmed slot on each team
    OnePerTeam,
    /// Every slot of the match confirmed
    AllPlayers,
}

impl ConfirmationPolicy {
    pub fn is_satisfied(self, tally: &ConfirmationTally) -> bool {
        match self {
            Self::OnePerTeam => TeamKey::ALL.iter().all(|&k| tally.team(k).0 > 0),
            Self::AllPlayers => TeamKey::ALL.iter().all(|&k| {
                let (confirmed, total) = tally.team(k);
                total > 0 && confirmed == total
            }),
        }
    }
}

// ============================================================================
// Status transitions
// ============================================================================

/// Status after a participant submits a result
pub fn status_after_submission(current: MatchStatus, tally: &ConfirmationTally) -> MatchStatus {
    let satisfied = ConfirmationPolicy::OnePerTeam.is_satisfied(tally);
    match (current, satisfied) {
        (_, true) => MatchStatus::Confirmed,
        (MatchStatus::Pending | MatchStatus::Confirmed | MatchStatus::Disputed, false) => {
            MatchStatus::Pending
        }
    }
}

/// Status after a participant confirms the recorded result
pub fn status_after_confirmation(current: MatchStatus, tally: &ConfirmationTally) -> MatchStatus {
    if ConfirmationPolicy::AllPlayers.is_satisfied(tally) {
        MatchStatus::Confirmed
    } else {
        current
    }
}

// ============================================================================
// Guards
// ============================================================================

pub fn ensure_creator(record: &Match, user_id: &UserId) -> Result<(), DomainError> {
    if record.is_creator(user_id) {
        Ok(())
    } else {
        Err(DomainError::NotMatchCreator)
    }
}

pub fn ensure_score(record: &Match) -> Result<(), DomainError> {
    if record.has_score() {
        Ok(())
    } else {
        Err(DomainError::MissingScore)
    }
}

pub fn ensure_sets(sets: u8) -> Result<(), DomainError> {
    if (MIN_SETS..=MAX_SETS).contains(&sets) {
        Ok(())
    } else {
        Err(DomainError::ValidationError(format!(
            "sets must be between {MIN_SETS} and {MAX_SETS}"
        )))
    }
}

/// Every position of the format must appear exactly once
pub fn ensure_positions(format: MatchFormat, positions: &[u8]) -> Result<(), DomainError> {
    let expected = format.player_count();
    if positions.len() != usize::from(expected) {
        return Err(DomainError::ValidationError(format!(
            "a {} match needs exactly {expected} slots",
            format.as_str().to_lowercase()
        )));
    }

    let mut seen = [false; 8];
    for &position in positions {
        if position >= expected {
            return Err(DomainError::ValidationError(format!(
                "slot position {position} is out of range"
            )));
        }
        let slot = &mut seen[usize::from(position)];
        if *slot {
            return Err(DomainError::ValidationError(format!(
                "slot position {position} appears more than once"
            )));
        }
        *slot = true;
    }
    Ok(())
}

// ============================================================================
// Joining
// ============================================================================

/// Reason a user cannot claim a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinBlocker {
    MatchClosed,
    SlotTaken,
    AlreadyInMatch,
}

impl JoinBlocker {
    pub fn code(self) -> &'static str {
        match self {
            Self::MatchClosed => "MATCH_CLOSED",
            Self::SlotTaken => "SLOT_OCCUPIED",
            Self::AlreadyInMatch => "ALREADY_IN_MATCH",
        }
    }
}

impl From<JoinBlocker> for DomainError {
    fn from(blocker: JoinBlocker) -> Self {
        match blocker {
            JoinBlocker::MatchClosed => Self::MatchClosed,
            JoinBlocker::SlotTaken => Self::SlotOccupied,
            JoinBlocker::AlreadyInMatch => Self::AlreadyInMatch,
        }
    }
}

/// Check whether `user_id` may claim `player`
pub fn check_join(details: &MatchDetails, player: &MatchPlayer, user_id: &UserId) -> Result<(), JoinBlocker> {
    match details.record.status {
        MatchStatus::Pending => {}
        MatchStatus::Confirmed | MatchStatus::Disputed => return Err(JoinBlocker::MatchClosed),
    }
    if player.is_claimed() {
        return Err(JoinBlocker::SlotTaken);
    }
    if details.is_participant(user_id) {
        return Err(JoinBlocker::AlreadyInMatch);
    }
    Ok(())
}

// ============================================================================
// Text helpers
// ============================================================================

/// Trim optional free text; blank becomes `None`
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Placeholder name left behind when a user is removed from a slot:
/// the explicit override, else the slot's prior placeholder name, else the
/// departing user's name.
pub fn release_fallback_name(
    override_name: Option<&str>,
    player: &MatchPlayer,
    departing: Option<&User>,
) -> Option<String> {
    clean_text(override_name)
        .or_else(|| clean_text(player.display_name.as_deref()))
        .or_else(|| departing.and_then(|u| clean_text(Some(&u.display_name))))
}

// ============================================================================
// Viewer capabilities
// ============================================================================

/// What the current viewer may do with a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerCapabilities {
    pub is_creator: bool,
    pub is_participant: bool,
    pub viewer_confirmed: bool,
    pub can_submit_result: bool,
    pub can_confirm_result: bool,
}

impl ViewerCapabilities {
    pub fn for_viewer(details: &MatchDetails, viewer: Option<&UserId>) -> Self {
        let Some(viewer) = viewer else {
            return Self::default();
        };

        let slot = details.player_for_user(viewer);
        let is_participant = slot.is_some();
        let viewer_confirmed = slot.is_some_and(|p| p.confirmed);
        let open = match details.record.status {
            MatchStatus::Pending | MatchStatus::Disputed => true,
            MatchStatus::Confirmed => false,
        };

        Self {
            is_creator: details.record.is_creator(viewer),
            is_participant,
            viewer_confirmed,
            can_submit_result: is_participant && open,
            can_confirm_result: is_participant && !viewer_confirmed && details.record.has_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::entities::{MatchType, Team};
    use crate::value_objects::{MatchId, PlayerId, TeamId};

    fn doubles(confirmed: [bool; 4], users: [Option<&str>; 4]) -> MatchDetails {
        let now = Utc::now();
        let match_id = MatchId::new("m");
        let record = Match::new(
            match_id.clone(),
            UserId::new("creator"),
            3,
            MatchType::Friendly,
            MatchFormat::Doubles,
            now,
        );
        let players = (0..4u8)
            .map(|pos| {
                let i = usize::from(pos);
                let mut p = match users[i] {
                    Some(u) => MatchPlayer::for_user(
                        PlayerId::new(format!("p{pos}")),
                        match_id.clone(),
                        pos,
                        UserId::new(u),
                    ),
                    None => MatchPlayer::placeholder(
                        PlayerId::new(format!("p{pos}")),
                        match_id.clone(),
                        pos,
                        format!("Invitado {pos}"),
                    ),
                };
                p.confirmed = confirmed[i];
                p
            })
            .collect();
        let teams = TeamKey::ALL
            .iter()
            .map(|&k| Team::new(TeamId::generate(), match_id.clone(), k, MatchFormat::Doubles, None))
            .collect();
        MatchDetails::new(record, players, teams, Vec::new())
    }

    fn tally(d: &MatchDetails) -> ConfirmationTally {
        ConfirmationTally::from_players(d.record.format, &d.players)
    }

    #[test]
    fn test_tally_counts_per_team() {
        let d = doubles([true, false, false, true], [Some("creator"), None, None, None]);
        let t = tally(&d);
        assert_eq!(t.team(TeamKey::A), (1, 2));
        assert_eq!(t.team(TeamKey::B), (1, 2));
    }

    #[test]
    fn test_one_per_team_policy() {
        let one_side = doubles([true, true, false, false], [None; 4]);
        assert!(!ConfirmationPolicy::OnePerTeam.is_satisfied(&tally(&one_side)));

        let both = doubles([true, false, false, true], [None; 4]);
        assert!(ConfirmationPolicy::OnePerTeam.is_satisfied(&tally(&both)));
        assert!(!ConfirmationPolicy::AllPlayers.is_satisfied(&tally(&both)));

        let all = doubles([true; 4], [None; 4]);
        assert!(ConfirmationPolicy::AllPlayers.is_satisfied(&tally(&all)));
    }

    #[test]
    fn test_all_players_requires_slots() {
        assert!(!ConfirmationPolicy::AllPlayers.is_satisfied(&ConfirmationTally::default()));
    }

    #[test]
    fn test_submission_transitions() {
        let both = tally(&doubles([true, false, true, false], [None; 4]));
        let one = tally(&doubles([true, false, false, false], [None; 4]));

        assert_eq!(status_after_submission(MatchStatus::Pending, &both), MatchStatus::Confirmed);
        assert_eq!(status_after_submission(MatchStatus::Disputed, &both), MatchStatus::Confirmed);
        assert_eq!(status_after_submission(MatchStatus::Confirmed, &one), MatchStatus::Pending);
        assert_eq!(status_after_submission(MatchStatus::Disputed, &one), MatchStatus::Pending);
        assert_eq!(status_after_submission(MatchStatus::Pending, &one), MatchStatus::Pending);
    }

    #[test]
    fn test_confirmation_never_reverts() {
        let partial = tally(&doubles([true, true, true, false], [None; 4]));
        let full = tally(&doubles([true; 4], [None; 4]));

        assert_eq!(status_after_confirmation(MatchStatus::Pending, &partial), MatchStatus::Pending);
        assert_eq!(status_after_confirmation(MatchStatus::Confirmed, &partial), MatchStatus::Confirmed);
        assert_eq!(status_after_confirmation(MatchStatus::Pending, &full), MatchStatus::Confirmed);
    }

    #[test]
    fn test_ensure_positions() {
        assert!(ensure_positions(MatchFormat::Doubles, &[3, 1, 0, 2]).is_ok());
        assert!(ensure_positions(MatchFormat::Singles, &[0, 1]).is_ok());
        assert!(ensure_positions(MatchFormat::Doubles, &[0, 1, 2]).is_err());
        assert!(ensure_positions(MatchFormat::Doubles, &[0, 1, 1, 2]).is_err());
        assert!(ensure_positions(MatchFormat::Singles, &[0, 2]).is_err());
    }

    #[test]
    fn test_ensure_sets() {
        assert!(ensure_sets(0).is_err());
        assert!(ensure_sets(1).is_ok());
        assert!(ensure_sets(5).is_ok());
        assert!(ensure_sets(6).is_err());
    }

    #[test]
    fn test_check_join() {
        let mut d = doubles([false; 4], [Some("creator"), None, None, Some("v")]);
        let open = d.players[1].clone();
        let taken = d.players[3].clone();

        assert_eq!(check_join(&d, &open, &UserId::new("w")), Ok(()));
        assert_eq!(check_join(&d, &taken, &UserId::new("w")), Err(JoinBlocker::SlotTaken));
        assert_eq!(check_join(&d, &open, &UserId::new("v")), Err(JoinBlocker::AlreadyInMatch));

        d.record.status = MatchStatus::Confirmed;
        assert_eq!(check_join(&d, &open, &UserId::new("w")), Err(JoinBlocker::MatchClosed));
    }

    #[test]
    fn test_release_fallback_name() {
        let now = Utc::now();
        let mut slot = MatchPlayer::for_user(PlayerId::new("p"), MatchId::new("m"), 1, UserId::new("u"));
        let user = User::new(UserId::new("u"), "Pablo".into(), None, now);

        assert_eq!(release_fallback_name(Some(" Nico "), &slot, Some(&user)).as_deref(), Some("Nico"));
        assert_eq!(release_fallback_name(Some(""), &slot, Some(&user)).as_deref(), Some("Pablo"));
        assert_eq!(release_fallback_name(None, &slot, None), None);

        slot.display_name = Some("Previo".into());
        assert_eq!(release_fallback_name(None, &slot, Some(&user)).as_deref(), Some("Previo"));
    }

    #[test]
    fn test_viewer_capabilities() {
        let mut d = doubles([false; 4], [Some("creator"), Some("v"), None, None]);

        let anon = ViewerCapabilities::for_viewer(&d, None);
        assert_eq!(anon, ViewerCapabilities::default());

        let creator = ViewerCapabilities::for_viewer(&d, Some(&UserId::new("creator")));
        assert!(creator.is_creator && creator.is_participant && creator.can_submit_result);
        assert!(!creator.can_confirm_result);

        d.record.score = Some("6-4".into());
        let guest = ViewerCapabilities::for_viewer(&d, Some(&UserId::new("v")));
        assert!(!guest.is_creator);
        assert!(guest.can_confirm_result);

        d.record.status = MatchStatus::Confirmed;
        let late = ViewerCapabilities::for_viewer(&d, Some(&UserId::new("v")));
        assert!(!late.can_submit_result);

        let outsider = ViewerCapabilities::for_viewer(&d, Some(&UserId::new("x")));
        assert!(!outsider.is_participant && !outsider.can_confirm_result);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(Some("  Club Norte ")).as_deref(), Some("Club Norte"));
        assert_eq!(clean_text(Some("   ")), None);
        assert_eq!(clean_text(None), None);
    }
}
