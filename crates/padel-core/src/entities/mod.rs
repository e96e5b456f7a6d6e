//! Domain entities - core business objects

mod details;
mod invitation;
mod padel_match;
mod player;
mod team;
mod user;

pub use details::MatchDetails;
pub use invitation::Invitation;
pub use padel_match::{Match, MatchFormat, MatchStatus, MatchType};
pub use player::{default_slot_name, MatchPlayer};
pub use team::{sanitize_label, Team, TeamKey, MAX_LABEL_LEN};
pub use user::{normalize_email, Principal, User, DEFAULT_LEVEL};
