//! Match player (slot) database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for match_players table
#[derive(Debug, Clone, FromRow)]
pub struct MatchPlayerModel {
    pub id: String,
    pub match_id: String,
    pub position: i16,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub team_id: Option<String>,
    pub confirmed: bool,
    pub joined_at: Option<DateTime<Utc>>,
}
