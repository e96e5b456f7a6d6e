//! User entity - an account known to the app

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Playing level assigned to new accounts
pub const DEFAULT_LEVEL: i32 = 6;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
    pub display_name: String,
    pub image: Option<String>,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: UserId, display_name: String, email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            display_name,
            image: None,
            level: DEFAULT_LEVEL,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the record for a principal seen for the first time
    pub fn from_principal(principal: &Principal, now: DateTime<Utc>) -> Self {
        let mut user = Self::new(
            principal.user_id.clone(),
            principal.preferred_name(),
            principal.email.as_deref().map(normalize_email),
            now,
        );
        user.image.clone_from(&principal.image);
        user
    }

    /// Refresh the profile fields the identity provider owns.
    /// Returns `true` when something changed.
    pub fn refresh_from(&mut self, principal: &Principal, now: DateTime<Utc>) -> bool {
        let display_name = principal.preferred_name();
        let email = principal.email.as_deref().map(normalize_email);

        let changed = self.display_name != display_name
            || (email.is_some() && self.email != email)
            || (principal.image.is_some() && self.image != principal.image);
        if changed {
            self.display_name = display_name;
            if email.is_some() {
                self.email = email;
            }
            if principal.image.is_some() {
                self.image.clone_from(&principal.image);
            }
            self.updated_at = now;
        }
        changed
    }
}

/// Lower-cased, trimmed email used for lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The authenticated caller of an operation, as supplied by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            display_name: None,
            email: None,
            image: None,
        }
    }

    /// Display name, else the email local part, else a generic name
    pub fn preferred_name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::trim)
            .filter(|local| !local.is_empty())
            .map_or_else(|| "Jugador".to_string(), ToString::to_string)
    }
}
