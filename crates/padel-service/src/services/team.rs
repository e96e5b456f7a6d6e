//! Team service

use chrono::Utc;
use padel_core::entities::{sanitize_label, Principal};
use padel_core::lifecycle::ensure_creator;
use padel_core::value_objects::{MatchId, TeamId};
use padel_core::DomainError;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{MatchResponse, RenameTeamRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::padel_match::{load_details, render};
use super::transaction::with_transaction;

/// Team service
pub struct TeamService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TeamService<'a> {
    /// Create a new TeamService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Relabel one side of a match (creator only). A blank label restores
    /// the default for that side.
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn rename_team(
        &self,
        principal: &Principal,
        match_id: &MatchId,
        team_id: &TeamId,
        request: RenameTeamRequest,
    ) -> ServiceResult<MatchResponse> {
        request.validate()?;

        let user_id = principal.user_id.clone();
        let id = match_id.clone();
        let team_id = team_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let mut record = tx
                    .find_match(&id)
                    .await?
                    .ok_or_else(|| DomainError::MatchNotFound(id.clone()))?;
                ensure_creator(&record, &user_id)?;

                let mut team = tx
                    .find_team(&team_id)
                    .await?
                    .ok_or_else(|| DomainError::TeamNotFound(team_id.clone()))?;
                if team.match_id != record.id {
                    return Err(DomainError::TeamNotInMatch.into());
                }

                team.label = sanitize_label(Some(&request.label), team.key, record.format);
                tx.update_team(&team).await?;
                record.updated_at = Utc::now();
                tx.update_match(&record).await?;

                Ok(load_details(tx, &id).await?)
            })
        })
        .await?;

        info!(match_id = %match_id, "Team renamed");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }
}
