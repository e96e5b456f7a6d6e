//! Value objects - immutable types that represent domain concepts

mod ids;
mod links;
mod score;

pub use ids::{InvitationId, MatchId, PlayerId, TeamId, UserId};
pub use links::{generate_token, generate_token_with_len, LinkBuilder, LinkResource, DEFAULT_BASE_URL, DEFAULT_TOKEN_LENGTH};
pub use score::{Score, ScoreParseError, SetScore, MAX_SETS, MIN_SETS};
