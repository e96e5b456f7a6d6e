//! Service context - dependency container for services
//!
//! Holds the match store, the identity token verifier and link settings.

use std::sync::Arc;

use chrono::Duration;
use padel_common::auth::JwtService;
use padel_core::traits::MatchStore;
use padel_core::value_objects::LinkBuilder;

use super::error::{ServiceError, ServiceResult};

const DEFAULT_INVITATION_TTL_HOURS: i64 = 168;

/// Service context containing all dependencies
///
/// Built once at startup and shared by every request. Services borrow it
/// for the duration of one operation.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn MatchStore>,
    jwt_service: Arc<JwtService>,
    links: LinkBuilder,
    invitation_ttl: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        store: Arc<dyn MatchStore>,
        jwt_service: Arc<JwtService>,
        links: LinkBuilder,
        invitation_ttl: Duration,
    ) -> Self {
        Self {
            store,
            jwt_service,
            links,
            invitation_ttl,
        }
    }

    /// Get the match store
    pub fn store(&self) -> &dyn MatchStore {
        self.store.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the join link builder
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Lifetime of newly created email invitations
    pub fn invitation_ttl(&self) -> Duration {
        self.invitation_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"dyn MatchStore")
            .field("links", &self.links.base_url())
            .field("invitation_ttl_hours", &self.invitation_ttl.num_hours())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn MatchStore>>,
    jwt_service: Option<Arc<JwtService>>,
    base_url: Option<String>,
    invitation_ttl_hours: Option<i64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn MatchStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn invitation_ttl_hours(mut self, hours: i64) -> Self {
        self.invitation_ttl_hours = Some(hours);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing
    /// or the invitation lifetime is not positive
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let hours = self
            .invitation_ttl_hours
            .unwrap_or(DEFAULT_INVITATION_TTL_HOURS);
        if hours <= 0 {
            return Err(ServiceError::validation("invitation_ttl_hours must be positive"));
        }

        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            LinkBuilder::new(self.base_url.as_deref()),
            Duration::hours(hours),
        ))
    }
}
