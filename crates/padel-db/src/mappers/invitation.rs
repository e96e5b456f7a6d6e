//! Invitation entity <-> model mapper

use padel_core::entities::Invitation;
use padel_core::value_objects::{InvitationId, MatchId};

use crate::models::InvitationModel;

/// Convert InvitationModel to Invitation entity
impl From<InvitationModel> for Invitation {
    fn from(model: InvitationModel) -> Self {
        Invitation {
            id: InvitationId::new(model.id),
            match_id: MatchId::new(model.match_id),
            position: model.position as u8,
            email: model.email,
            token: model.token,
            expires_at: model.expires_at,
            accepted: model.accepted,
            created_at: model.created_at,
        }
    }
}
