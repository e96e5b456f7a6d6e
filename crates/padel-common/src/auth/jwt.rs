//! Identity tokens
//!
//! Sign-in is handled by an external identity provider, which hands the
//! client an HS256-signed JWT. This module verifies those tokens and turns
//! their claims into the acting [`Principal`]. Token issuance exists for
//! tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use padel_core::entities::Principal;
use padel_core::value_objects::UserId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID at the identity provider)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is blank
    pub fn user_id(&self) -> Result<UserId, AppError> {
        let sub = self.sub.trim();
        if sub.is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(UserId::new(sub))
    }

    /// Build the acting principal from the claims
    ///
    /// # Errors
    /// Returns an error if the subject is blank
    pub fn principal(&self) -> Result<Principal, AppError> {
        Ok(Principal {
            user_id: self.user_id()?,
            display_name: self.name.clone(),
            email: self.email.clone(),
            image: self.picture.clone(),
        })
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT service for verifying (and, for tooling, issuing) identity tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    leeway_seconds: u64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and clock-skew leeway
    #[must_use]
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway_seconds,
        }
    }

    /// Issue a token for a principal, valid for `ttl_seconds`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(&self, principal: &Principal, ttl_seconds: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            name: principal.display_name.clone(),
            email: principal.email.clone(),
            picture: principal.image.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = self.leeway_seconds;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate a token and return the acting principal
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or has no subject
    pub fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        self.decode_token(token)?.principal()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}
