//! Invitation service

use chrono::Utc;
use padel_core::entities::Principal;
use padel_core::value_objects::MatchId;
use padel_core::DomainError;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{AcceptInvitationRequest, MatchResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::padel_match::{load_details, render};
use super::transaction::with_transaction;
use super::user::ensure_user;

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    /// Create a new InvitationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Accept an email invitation, binding its slot to the principal as a
    /// confirmed player
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn accept_invitation(
        &self,
        principal: &Principal,
        match_id: &MatchId,
        request: AcceptInvitationRequest,
    ) -> ServiceResult<MatchResponse> {
        request.validate()?;

        let accepter = principal.clone();
        let id = match_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let now = Utc::now();
                ensure_user(tx, &accepter, now).await?;

                let Some(mut invitation) = tx.find_invitation(&id, request.token.trim()).await? else {
                    warn!(match_id = %id, "Unknown invitation token");
                    return Err(DomainError::InvitationNotFound.into());
                };
                if invitation.accepted {
                    return Err(DomainError::InvitationAlreadyAccepted.into());
                }
                if invitation.is_expired_at(now) {
                    return Err(DomainError::InvitationExpired.into());
                }

                tx.find_match(&id)
                    .await?
                    .ok_or_else(|| DomainError::MatchNotFound(id.clone()))?;
                let mut player = tx
                    .find_player_by_position(&id, invitation.position)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Slot", invitation.position.to_string()))?;

                if let Some(held) = tx.find_player_by_user(&id, &accepter.user_id).await? {
                    if held.id != player.id {
                        return Err(DomainError::AlreadyInMatch.into());
                    }
                }

                invitation.accepted = true;
                tx.update_invitation(&invitation).await?;
                player.claim(accepter.user_id.clone(), true, now);
                tx.update_player(&player).await?;

                Ok(load_details(tx, &id).await?)
            })
        })
        .await?;

        info!(match_id = %match_id, "Invitation accepted");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }
}
