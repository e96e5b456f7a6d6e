//! Team database model

use sqlx::FromRow;

/// Database model for teams table
#[derive(Debug, Clone, FromRow)]
pub struct TeamModel {
    pub id: String,
    pub match_id: String,
    pub team_key: String,
    pub label: String,
}
