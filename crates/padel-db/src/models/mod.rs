//! Database models - SQLx-compatible structs for PostgreSQL tables

mod invitation;
mod padel_match;
mod player;
mod team;
mod user;

pub use invitation::InvitationModel;
pub use padel_match::MatchModel;
pub use player::MatchPlayerModel;
pub use team::TeamModel;
pub use user::UserModel;
