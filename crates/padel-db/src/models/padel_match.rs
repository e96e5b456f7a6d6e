//! Match database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for matches table
#[derive(Debug, Clone, FromRow)]
pub struct MatchModel {
    pub id: String,
    pub creator_id: String,
    pub status: String,
    pub sets: i16,
    pub match_type: String,
    pub format: String,
    pub counts_for_ranking: bool,
    pub club: Option<String>,
    pub court_number: Option<String>,
    pub notes: Option<String>,
    pub score: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
