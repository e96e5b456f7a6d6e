//! Invitation entity - an email invite bound to one slot

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{InvitationId, MatchId};

/// Invitation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: InvitationId,
    pub match_id: MatchId,
    pub position: u8,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Create an invitation valid for `ttl` from `now`
    pub fn new(
        id: InvitationId,
        match_id: MatchId,
        position: u8,
        email: String,
        token: String,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            match_id,
            position,
            email,
            token,
            expires_at: now + ttl,
            accepted: false,
            created_at: now,
        }
    }

    /// Check if invitation is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Check if invitation can still be accepted
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.accepted && !self.is_expired_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(now: DateTime<Utc>) -> Invitation {
        Invitation::new(
            InvitationId::new("i"),
            MatchId::new("m"),
            2,
            "v@club.es".into(),
            "T".into(),
            Duration::hours(1),
            now,
        )
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let inv = invitation(now);
        assert!(inv.is_usable_at(now));
        assert!(inv.is_expired_at(now + Duration::hours(1)));
        assert!(!inv.is_usable_at(now + Duration::hours(2)));
    }

    #[test]
    fn test_accepted_is_not_usable() {
        let now = Utc::now();
        let mut inv = invitation(now);
        inv.accepted = true;
        assert!(!inv.is_usable_at(now));
    }
}
