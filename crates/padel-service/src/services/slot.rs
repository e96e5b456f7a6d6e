//! Slot service
//!
//! Join-link preview, claiming and releasing slots, and placeholder renames.

use chrono::Utc;
use padel_core::entities::{MatchDetails, MatchPlayer, Principal};
use padel_core::lifecycle::{check_join, clean_text, ensure_creator, release_fallback_name};
use padel_core::traits::MatchTransaction;
use padel_core::value_objects::{PlayerId, UserId};
use padel_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    JoinBlockReason, MatchResponse, MatchSummaryResponse, ReleaseSlotRequest, RenameSlotRequest,
    SlotPreviewResponse, SlotResponse, SlotView, SummaryView,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::padel_match::{load_details, render};
use super::transaction::with_transaction;
use super::user::ensure_user;

/// Slot service
pub struct SlotService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SlotService<'a> {
    /// Create a new SlotService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Preview a join link: the slot, its match, and whether `viewer` may claim it
    #[instrument(skip(self))]
    pub async fn get_slot(
        &self,
        player_id: &PlayerId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<SlotPreviewResponse> {
        let details = self
            .ctx
            .store()
            .find_details_by_player(player_id)
            .await?
            .ok_or_else(|| DomainError::PlayerNotFound(player_id.clone()))?;
        let player = details
            .player(player_id)
            .ok_or_else(|| DomainError::PlayerNotFound(player_id.clone()))?;

        let blocked_by = match viewer {
            Some(user_id) => check_join(&details, player, user_id)
                .err()
                .map(JoinBlockReason::from),
            None => Some(JoinBlockReason::NotSignedIn),
        };

        Ok(SlotPreviewResponse {
            slot: SlotResponse::from(SlotView {
                details: &details,
                player,
            }),
            team_label: details.team_label_of(player),
            match_summary: MatchSummaryResponse::from(SummaryView {
                record: &details.record,
                links: self.ctx.links(),
            }),
            can_join: blocked_by.is_none(),
            blocked_by,
        })
    }

    /// Claim an open slot for the principal
    #[instrument(skip(self, principal), fields(user_id = %principal.user_id))]
    pub async fn join_slot(
        &self,
        principal: &Principal,
        player_id: &PlayerId,
    ) -> ServiceResult<MatchResponse> {
        let joiner = principal.clone();
        let id = player_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let now = Utc::now();
                ensure_user(tx, &joiner, now).await?;
                let (details, mut player) = load_slot(tx, &id).await?;
                check_join(&details, &player, &joiner.user_id).map_err(DomainError::from)?;

                player.claim(joiner.user_id.clone(), false, now);
                tx.update_player(&player).await?;
                touch(tx, details).await?;

                Ok(load_details(tx, &player.match_id).await?)
            })
        })
        .await?;

        info!(player_id = %player_id, match_id = %details.record.id, "Slot joined");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }

    /// Free a slot, leaving a placeholder name behind (creator only)
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn release_slot(
        &self,
        principal: &Principal,
        player_id: &PlayerId,
        request: ReleaseSlotRequest,
    ) -> ServiceResult<MatchResponse> {
        request.validate()?;

        let user_id = principal.user_id.clone();
        let id = player_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let (details, mut player) = load_slot(tx, &id).await?;
                ensure_creator(&details.record, &user_id)?;

                let departing = player.user_id.as_ref().and_then(|u| details.user(u));
                let fallback = release_fallback_name(request.display_name.as_deref(), &player, departing);
                player.release(fallback);
                tx.update_player(&player).await?;
                touch(tx, details).await?;

                Ok(load_details(tx, &player.match_id).await?)
            })
        })
        .await?;

        info!(player_id = %player_id, match_id = %details.record.id, "Slot released");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }

    /// Rename a slot no account holds (creator only)
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn rename_placeholder(
        &self,
        principal: &Principal,
        player_id: &PlayerId,
        request: RenameSlotRequest,
    ) -> ServiceResult<MatchResponse> {
        request.validate()?;
        let name = clean_text(Some(&request.display_name))
            .ok_or_else(|| ServiceError::validation("Name must not be blank"))?;

        let user_id = principal.user_id.clone();
        let id = player_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let (details, mut player) = load_slot(tx, &id).await?;
                ensure_creator(&details.record, &user_id)?;
                if player.is_claimed() {
                    return Err(DomainError::SlotClaimed.into());
                }

                player.display_name = Some(name);
                tx.update_player(&player).await?;

                Ok(load_details(tx, &player.match_id).await?)
            })
        })
        .await?;

        info!(player_id = %player_id, "Placeholder renamed");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }
}

/// Load a slot together with its match
///
/// The first read only finds the match. The slot returned is the one read
/// after the match row is locked, so a concurrent claim is always seen.
async fn load_slot(
    tx: &mut dyn MatchTransaction,
    player_id: &PlayerId,
) -> Result<(MatchDetails, MatchPlayer), DomainError> {
    let match_id = tx
        .find_player(player_id)
        .await?
        .ok_or_else(|| DomainError::PlayerNotFound(player_id.clone()))?
        .match_id;
    let details = load_details(tx, &match_id).await?;
    let player = details
        .player(player_id)
        .cloned()
        .ok_or_else(|| DomainError::PlayerNotFound(player_id.clone()))?;
    Ok((details, player))
}

/// Bump the match's `updated_at` after a roster change
async fn touch(tx: &mut dyn MatchTransaction, details: MatchDetails) -> Result<(), DomainError> {
    let mut record = details.record;
    record.updated_at = Utc::now();
    tx.update_match(&record).await
}
