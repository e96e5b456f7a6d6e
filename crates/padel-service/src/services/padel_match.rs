//! Match service
//!
//! Creates matches with all of their slots, serves the match view and
//! applies creator-only edits to descriptive fields.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use padel_core::entities::{
    normalize_email, Invitation, Match, MatchDetails, MatchPlayer, Principal, Team, TeamKey, User,
};
use padel_core::lifecycle::{clean_text, ensure_creator, ensure_positions, ensure_sets};
use padel_core::traits::MatchTransaction;
use padel_core::value_objects::{
    generate_token, InvitationId, MatchId, PlayerId, Score, TeamId, UserId,
};
use padel_core::{DomainError, MatchFormat};
use tracing::{info, instrument};
use validator::{Validate, ValidateEmail};

use crate::dto::{
    CreateMatchRequest, CreateMatchResponse, InvitationLinkResponse, JoinLinkResponse,
    MatchResponse, MatchSummaryResponse, MatchView, SlotOccupant, SlotRequest, SummaryView,
    UpdateMatchRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::transaction::with_transaction;
use super::user::ensure_user;

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;
const MAX_NAME_LEN: usize = 40;
const MAX_TOKEN_LEN: usize = 64;

/// Match service
pub struct MatchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MatchService<'a> {
    /// Create a new MatchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a match with every slot filled by the creator, a registered
    /// user, a placeholder name or an email invitation
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn create_match(
        &self,
        principal: &Principal,
        request: CreateMatchRequest,
    ) -> ServiceResult<CreateMatchResponse> {
        // Authorization comes first, whatever else the slots contain
        ensure_anchor(principal, &request.slots)?;
        request.validate()?;
        ensure_sets(request.sets)?;
        let slots = plan_slots(principal, request.format, &request.slots)?;

        let score = match clean_text(request.score.as_deref()) {
            Some(raw) => Some(Score::parse(&raw).map_err(DomainError::from)?.to_string()),
            None => None,
        };

        let now = Utc::now();
        let mut record = Match::new(
            MatchId::generate(),
            principal.user_id.clone(),
            request.sets,
            request.match_type,
            request.format,
            now,
        );
        record.counts_for_ranking = request.counts_for_ranking;
        record.club = clean_text(request.club.as_deref());
        record.court_number = clean_text(request.court_number.as_deref());
        record.notes = clean_text(request.notes.as_deref());
        record.score = score;

        let teams = [TeamKey::A, TeamKey::B].map(|key| {
            let label = match key {
                TeamKey::A => request.team_labels.a.as_deref(),
                TeamKey::B => request.team_labels.b.as_deref(),
            };
            Team::new(TeamId::generate(), record.id.clone(), key, request.format, label)
        });

        let principal = principal.clone();
        let ttl = self.ctx.invitation_ttl();
        let match_id = record.id.clone();

        let created = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                create_in_store(tx, &principal, record, teams, slots, ttl, now).await
            })
        })
        .await?;

        info!(
            match_id = %match_id,
            players = created.players.len(),
            invitations = created.invitations.len(),
            "Match created"
        );

        let links = self.ctx.links();
        let format = created.format;
        Ok(CreateMatchResponse {
            match_id: match_id.to_string(),
            share_link: links.match_link(match_id.as_str()),
            join_links: created
                .players
                .iter()
                .filter(|p| !p.is_claimed())
                .map(|p| JoinLinkResponse {
                    player_id: p.id.to_string(),
                    position: p.position,
                    team: format.team_for_position(p.position),
                    display_name: p.display_name.clone().unwrap_or_default(),
                    link: links.player_link(p.id.as_str()),
                })
                .collect(),
            invitation_links: created
                .invitations
                .iter()
                .map(|i| InvitationLinkResponse {
                    position: i.position,
                    email: i.email.clone(),
                    link: links.invitation_link(match_id.as_str(), &i.token),
                    expires_at: i.expires_at,
                })
                .collect(),
        })
    }

    /// Get a match as seen by `viewer`
    #[instrument(skip(self))]
    pub async fn get_match(
        &self,
        match_id: &MatchId,
        viewer: Option<&UserId>,
    ) -> ServiceResult<MatchResponse> {
        let details = self
            .ctx
            .store()
            .find_match_details(match_id)
            .await?
            .ok_or_else(|| DomainError::MatchNotFound(match_id.clone()))?;

        Ok(render(self.ctx, &details, viewer))
    }

    /// Most recently updated matches the user plays in
    #[instrument(skip(self))]
    pub async fn list_my_matches(
        &self,
        user_id: &UserId,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<MatchSummaryResponse>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        let matches = self.ctx.store().find_matches_by_user(user_id, limit).await?;
        let links = self.ctx.links();

        Ok(matches
            .iter()
            .map(|record| MatchSummaryResponse::from(SummaryView { record, links }))
            .collect())
    }

    /// Update club, court and notes (creator only)
    #[instrument(skip(self, principal, request), fields(user_id = %principal.user_id))]
    pub async fn update_details(
        &self,
        principal: &Principal,
        match_id: &MatchId,
        request: UpdateMatchRequest,
    ) -> ServiceResult<MatchResponse> {
        request.validate()?;

        let user_id = principal.user_id.clone();
        let id = match_id.clone();
        let details = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move {
                let mut record = tx
                    .find_match(&id)
                    .await?
                    .ok_or_else(|| DomainError::MatchNotFound(id.clone()))?;
                ensure_creator(&record, &user_id)?;

                if let Some(club) = request.club.as_deref() {
                    record.club = clean_text(Some(club));
                }
                if let Some(court) = request.court_number.as_deref() {
                    record.court_number = clean_text(Some(court));
                }
                if let Some(notes) = request.notes.as_deref() {
                    record.notes = clean_text(Some(notes));
                }
                record.updated_at = Utc::now();
                tx.update_match(&record).await?;

                Ok(load_details(tx, &id).await?)
            })
        })
        .await?;

        info!(match_id = %match_id, "Match details updated");
        Ok(render(self.ctx, &details, Some(&principal.user_id)))
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Reload the aggregate inside a transaction
pub(crate) async fn load_details(
    tx: &mut dyn MatchTransaction,
    match_id: &MatchId,
) -> Result<MatchDetails, DomainError> {
    tx.find_match_details(match_id)
        .await?
        .ok_or_else(|| DomainError::MatchNotFound(match_id.clone()))
}

/// Render a match for a viewer with the configured links
pub(crate) fn render(
    ctx: &ServiceContext,
    details: &MatchDetails,
    viewer: Option<&UserId>,
) -> MatchResponse {
    MatchResponse::from(MatchView {
        details,
        viewer,
        links: ctx.links(),
    })
}

// =============================================================================
// Creation
// =============================================================================

/// A slot after input validation
#[derive(Debug)]
enum PlannedOccupant {
    Creator,
    User(UserId),
    Placeholder(String),
    Invite {
        email: String,
        name: String,
        token: String,
    },
}

#[derive(Debug)]
struct PlannedSlot {
    position: u8,
    occupant: PlannedOccupant,
}

struct Created {
    format: MatchFormat,
    players: Vec<MatchPlayer>,
    invitations: Vec<Invitation>,
}

fn ensure_anchor(principal: &Principal, slots: &[SlotRequest]) -> Result<(), DomainError> {
    let anchored = slots.iter().any(|slot| {
        slot.position == 0
            && matches!(
                &slot.occupant,
                SlotOccupant::User { user_id } if user_id.trim() == principal.user_id.as_str()
            )
    });
    if anchored {
        Ok(())
    } else {
        Err(DomainError::CreatorMustOccupyAnchorSlot)
    }
}

fn invalid(msg: impl Into<String>) -> ServiceError {
    ServiceError::validation(msg)
}

fn plan_slots(
    principal: &Principal,
    format: MatchFormat,
    slots: &[SlotRequest],
) -> ServiceResult<Vec<PlannedSlot>> {
    let positions: Vec<u8> = slots.iter().map(|s| s.position).collect();
    ensure_positions(format, &positions)?;

    let mut users = HashSet::new();
    let mut emails = HashSet::new();
    let mut tokens = HashSet::new();
    let mut planned = Vec::with_capacity(slots.len());

    for slot in slots {
        let occupant = match &slot.occupant {
            SlotOccupant::User { user_id } => {
                let user_id = user_id.trim();
                if user_id.is_empty() {
                    return Err(invalid(format!("slot {} needs a user id", slot.position)));
                }
                if !users.insert(user_id.to_string()) {
                    return Err(invalid("a player can occupy only one slot"));
                }
                if user_id == principal.user_id.as_str() {
                    PlannedOccupant::Creator
                } else {
                    PlannedOccupant::User(UserId::new(user_id))
                }
            }
            SlotOccupant::Placeholder { display_name } => {
                PlannedOccupant::Placeholder(slot_name(slot.position, Some(display_name))?)
            }
            SlotOccupant::Invite {
                email,
                display_name,
                token,
            } => {
                let email = normalize_email(email);
                if !email.validate_email() {
                    return Err(invalid(format!("slot {} has an invalid email", slot.position)));
                }
                if !emails.insert(email.clone()) {
                    return Err(invalid("an email can be invited to only one slot"));
                }
                let name = match clean_text(display_name.as_deref()) {
                    Some(_) => slot_name(slot.position, display_name.as_deref())?,
                    None => email.split('@').next().unwrap_or_default().to_string(),
                };
                let token = clean_text(token.as_deref()).unwrap_or_else(generate_token);
                if token.chars().count() > MAX_TOKEN_LEN || !tokens.insert(token.clone()) {
                    return Err(invalid(format!("slot {} has an unusable token", slot.position)));
                }
                PlannedOccupant::Invite { email, name, token }
            }
        };
        planned.push(PlannedSlot {
            position: slot.position,
            occupant,
        });
    }

    planned.sort_by_key(|s| s.position);
    Ok(planned)
}

fn slot_name(position: u8, raw: Option<&str>) -> ServiceResult<String> {
    let name = clean_text(raw).ok_or_else(|| invalid(format!("slot {position} needs a name")))?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(format!(
            "slot {position} name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

async fn create_in_store(
    tx: &mut dyn MatchTransaction,
    principal: &Principal,
    record: Match,
    teams: [Team; 2],
    slots: Vec<PlannedSlot>,
    ttl: Duration,
    now: DateTime<Utc>,
) -> ServiceResult<Created> {
    ensure_user(tx, principal, now).await?;
    tx.create_match(&record).await?;
    for team in &teams {
        tx.create_team(team).await?;
    }

    let format = record.format;
    let mut bound = HashSet::new();
    let mut players = Vec::with_capacity(slots.len());
    let mut invitations = Vec::new();

    for PlannedSlot { position, occupant } in slots {
        let id = PlayerId::generate();
        let mut player = match occupant {
            PlannedOccupant::Creator => {
                let mut p = MatchPlayer::for_user(id, record.id.clone(), position, principal.user_id.clone());
                p.joined_at = Some(now);
                p.confirmed = record.has_score();
                p
            }
            PlannedOccupant::User(user_id) => {
                if tx.find_user(&user_id).await?.is_none() {
                    return Err(DomainError::UserNotFound(user_id).into());
                }
                MatchPlayer::for_user(id, record.id.clone(), position, user_id)
            }
            PlannedOccupant::Placeholder(name) => {
                MatchPlayer::placeholder(id, record.id.clone(), position, name)
            }
            PlannedOccupant::Invite { email, name, token } => {
                let invitee = match tx.find_user_by_email(&email).await? {
                    Some(user) => user,
                    None => {
                        let user = User::new(UserId::generate(), name, Some(email.clone()), now);
                        tx.create_user(&user).await?;
                        user
                    }
                };
                let invitation = Invitation::new(
                    InvitationId::generate(),
                    record.id.clone(),
                    position,
                    email,
                    token,
                    ttl,
                    now,
                );
                tx.create_invitation(&invitation).await?;
                invitations.push(invitation);
                MatchPlayer::for_user(id, record.id.clone(), position, invitee.id)
            }
        };

        if let Some(user_id) = &player.user_id {
            if !bound.insert(user_id.clone()) {
                return Err(invalid("a player can occupy only one slot"));
            }
        }
        let key = format.team_for_position(position);
        player.team_id = teams.iter().find(|t| t.key == key).map(|t| t.id.clone());
        tx.create_player(&player).await?;
        players.push(player);
    }

    Ok(Created {
        format,
        players,
        invitations,
    })
}
