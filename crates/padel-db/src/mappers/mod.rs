//! Entity to model mappers
//!
//! Conversions between domain entities (padel-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `parse_*`: Decode enum columns stored as TEXT

mod invitation;
mod padel_match;
mod player;
mod team;
mod user;

pub use padel_match::{parse_format, parse_match_type, parse_status};
pub use team::parse_team_key;
