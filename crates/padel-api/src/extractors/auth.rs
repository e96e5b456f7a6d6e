//! Authentication extractor
//!
//! Verifies the bearer token issued by the identity provider and exposes
//! the acting principal.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use padel_core::entities::Principal;
use padel_core::value_objects::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated principal extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn user_id(&self) -> &UserId {
        &self.principal.user_id
    }
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let principal = state.jwt_service().authenticate(token).map_err(|e| {
        tracing::warn!(error = %e, "Rejected bearer token");
        ApiError::App(e)
    })?;

    Ok(AuthUser::new(principal))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        authenticate(&AppState::from_ref(state), bearer.token())
    }
}

/// Optional authenticated principal
///
/// `None` when no authorization header is present; an invalid token is
/// still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(AuthUser::user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let user = authenticate(&AppState::from_ref(state), bearer.token())?;
                Ok(OptionalAuthUser(Some(user)))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}
