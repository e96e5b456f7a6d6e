//! Result service
//!
//! Score submission, per-player confirmation and the creator's finalize
//! override. Status rules:
//!
//! | operation | tally rule              | may revert to PENDING |
//! |-----------|-------------------------|-----------------------|
//! | submit    | one confirmation a side | yes                   |
//! | confirm   | every slot confirmed    | no                    |
//! | finalize  | none, forced            | no                    |

use chrono::Utc;
use padel_core::entities::{MatchFormat, MatchStatus, Principal, TeamKey};
use padel_core::lifecycle::{
    clean_text, ensure_creator, ensure_score, status_after_confirmation, status_after_submission,
    ConfirmationTally,
};
use padel_core::traits::{MatchTransaction, PlayerFilter};
use padel_core::value_objects::{MatchId, Score};
use padel_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{MatchResponse, SubmitResultRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::padel_match::{load_details, render};
use super::transaction::with_transaction;

/// Result service
pub struct ResultService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ResultService<'a> {
    /// Create a new ResultService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record the score as a participant, confirming the submitter's slot
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn submit_result(
        &self,
        principal: &Principal,
        match_id: &MatchId,
        request: SubmitResultRequest,
    ) -> ServiceResult<MatchResponse> {
        request.validate()?;
        let score = Score::parse(&request.score).map_err(DomainError::from)?;

        let user_id = principal.user_id.clone();
        let id = match_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let details = load_details(tx, &id).await?;
                let mut player = details
                    .player_for_user(&user_id)
                    .cloned()
                    .ok_or(DomainError::NotParticipant)?;

                let mut record = details.record;
                record.score = Some(score.to_string());
                if let Some(notes) = request.notes.as_deref() {
                    record.notes = clean_text(Some(notes));
                }

                if !player.confirmed {
                    player.confirmed = true;
                    tx.update_player(&player).await?;
                }

                let tally = load_tally(tx, &id, record.format).await?;
                let status = status_after_submission(record.status, &tally);
                if status != record.status {
                    info!(match_id = %id, from = record.status.as_str(), to = status.as_str(), "Match status changed");
                    record.status = status;
                }
                record.updated_at = Utc::now();
                tx.update_match(&record).await?;

                Ok(load_details(tx, &id).await?)
            })
        })
        .await?;

        info!(match_id = %match_id, status = details.record.status.as_str(), "Result submitted");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }

    /// Confirm the recorded score. Confirming twice is a no-op.
    #[instrument(skip(self, principal), fields(user_id = %principal.user_id))]
    pub async fn confirm_result(
        &self,
        principal: &Principal,
        match_id: &MatchId,
    ) -> ServiceResult<MatchResponse> {
        let user_id = principal.user_id.clone();
        let id = match_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let details = load_details(tx, &id).await?;
                let mut player = details
                    .player_for_user(&user_id)
                    .cloned()
                    .ok_or(DomainError::NotParticipant)?;
                ensure_score(&details.record)?;

                if player.confirmed {
                    return Ok(details);
                }
                player.confirmed = true;
                tx.update_player(&player).await?;

                let mut record = details.record;
                let tally = load_tally(tx, &id, record.format).await?;
                let status = status_after_confirmation(record.status, &tally);
                if status != record.status {
                    info!(match_id = %id, from = record.status.as_str(), to = status.as_str(), "Match status changed");
                    record.status = status;
                }
                record.updated_at = Utc::now();
                tx.update_match(&record).await?;

                Ok(load_details(tx, &id).await?)
            })
        })
        .await?;

        info!(match_id = %match_id, "Result confirmed");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }

    /// Close the match as CONFIRMED and confirm every slot (creator only)
    #[instrument(skip(self, principal), fields(user_id = %principal.user_id))]
    pub async fn finalize_match(
        &self,
        principal: &Principal,
        match_id: &MatchId,
    ) -> ServiceResult<MatchResponse> {
        let user_id = principal.user_id.clone();
        let id = match_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let mut record = tx
                    .find_match(&id)
                    .await?
                    .ok_or_else(|| DomainError::MatchNotFound(id.clone()))?;
                ensure_creator(&record, &user_id)?;
                ensure_score(&record)?;

                let confirmed = tx.confirm_all_players(&id).await?;
                record.status = MatchStatus::Confirmed;
                record.updated_at = Utc::now();
                tx.update_match(&record).await?;
                info!(match_id = %id, confirmed, "Match finalized");

                Ok(load_details(tx, &id).await?)
            })
        })
        .await?;

        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }
}

/// Count confirmations per side through the store
async fn load_tally(
    tx: &mut dyn MatchTransaction,
    match_id: &MatchId,
    format: MatchFormat,
) -> Result<ConfirmationTally, DomainError> {
    let mut tally = ConfirmationTally::default();
    for key in TeamKey::ALL {
        let total = count(tx, match_id, &PlayerFilter::team(format, key)).await?;
        let confirmed = count(tx, match_id, &PlayerFilter::confirmed_on(format, key)).await?;
        match key {
            TeamKey::A => {
                tally.total_a = total;
                tally.confirmed_a = confirmed;
            }
            TeamKey::B => {
                tally.total_b = total;
                tally.confirmed_b = confirmed;
            }
        }
    }
    Ok(tally)
}

async fn count(
    tx: &mut dyn MatchTransaction,
    match_id: &MatchId,
    filter: &PlayerFilter,
) -> Result<u32, DomainError> {
    let n = tx.count_players(match_id, filter).await?;
    u32::try_from(n).map_err(|_| DomainError::InternalError(format!("invalid slot count {n}")))
}
