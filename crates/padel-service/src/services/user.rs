//! User service
//!
//! Keeps the local user record in step with the identity provider and
//! serves profile lookups and player search.

use chrono::{DateTime, Utc};
use padel_core::entities::{Principal, User};
use padel_core::traits::MatchTransaction;
use padel_core::value_objects::UserId;
use padel_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{PublicUserResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::transaction::with_transaction;

const MAX_SEARCH_LIMIT: i64 = 10;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create or refresh the record of a signed-in principal
    #[instrument(skip(self, principal), fields(user_id = %principal.user_id))]
    pub async fn sync_principal(&self, principal: &Principal) -> ServiceResult<UserResponse> {
        let principal = principal.clone();
        let user = with_transaction(self.ctx.store(), move |tx| {
            Box::pin(async move { ensure_user(tx, &principal, Utc::now()).await.map_err(Into::into) })
        })
        .await?;

        Ok(UserResponse::from(user))
    }

    /// Get the current user's profile
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: &UserId) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .store()
            .find_user(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()))?;

        Ok(UserResponse::from(user))
    }

    /// Search players by name or email
    #[instrument(skip(self))]
    pub async fn search_players(
        &self,
        query: &str,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<PublicUserResponse>> {
        let limit = limit.unwrap_or(MAX_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT);
        let users = self.ctx.store().search_users(query.trim(), limit).await?;

        Ok(users.iter().map(PublicUserResponse::from).collect())
    }
}

/// Load the principal's user record, creating it on first sight and
/// refreshing provider-owned fields otherwise.
///
/// When the principal's email already belongs to another record (for
/// example one created for an email invitation) the new record is created
/// without an email.
pub(crate) async fn ensure_user(
    tx: &mut dyn MatchTransaction,
    principal: &Principal,
    now: DateTime<Utc>,
) -> Result<User, DomainError> {
    if let Some(mut user) = tx.find_user(&principal.user_id).await? {
        let previous_email = user.email.clone();
        if user.refresh_from(principal, now) {
            if email_owned_elsewhere(tx, &user).await? {
                warn!(user_id = %user.id, "Email belongs to another user, keeping the old one");
                user.email = previous_email;
            }
            tx.update_user(&user).await?;
        }
        return Ok(user);
    }

    let mut user = User::from_principal(principal, now);
    if email_owned_elsewhere(tx, &user).await? {
        warn!(user_id = %user.id, "Email belongs to another user, creating without it");
        user.email = None;
    }
    tx.create_user(&user).await?;
    info!(user_id = %user.id, "User created");

    Ok(user)
}

async fn email_owned_elsewhere(tx: &mut dyn MatchTransaction, user: &User) -> Result<bool, DomainError> {
    match user.email.as_deref() {
        Some(email) => Ok(tx
            .find_user_by_email(email)
            .await?
            .is_some_and(|owner| owner.id != user.id)),
        None => Ok(false),
    }
}
