//! Invitation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub id: String,
    pub match_id: String,
    pub position: i16,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}
