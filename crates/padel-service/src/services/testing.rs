//! Fixtures shared by the service tests

use std::sync::Arc;

use padel_common::auth::JwtService;
use padel_core::entities::{MatchFormat, MatchType, Principal};
use padel_core::value_objects::UserId;
use padel_db::MemoryMatchStore;

use super::context::{ServiceContext, ServiceContextBuilder};
use super::user::UserService;
use crate::dto::{CreateMatchRequest, CreateMatchResponse, SlotOccupant, SlotRequest, TeamLabels};
use crate::services::MatchService;

pub fn context() -> ServiceContext {
    ServiceContextBuilder::new()
        .store(Arc::new(MemoryMatchStore::new()))
        .jwt_service(Arc::new(JwtService::new("test-secret", 0)))
        .base_url(Some("https://padel.test".to_string()))
        .build()
        .unwrap()
}

/// Principal whose id is `id`, named after it and with a club email
pub fn principal(id: &str) -> Principal {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Principal {
        user_id: UserId::new(id),
        display_name: Some(name),
        email: Some(format!("{id}@club.es")),
        image: None,
    }
}

pub async fn signed_in(ctx: &ServiceContext, id: &str) -> Principal {
    let p = principal(id);
    UserService::new(ctx).sync_principal(&p).await.unwrap();
    p
}

pub fn user_slot(position: u8, user_id: &str) -> SlotRequest {
    SlotRequest {
        position,
        occupant: SlotOccupant::User {
            user_id: user_id.to_string(),
        },
    }
}

pub fn placeholder_slot(position: u8, name: &str) -> SlotRequest {
    SlotRequest {
        position,
        occupant: SlotOccupant::Placeholder {
            display_name: name.to_string(),
        },
    }
}

pub fn invite_slot(position: u8, email: &str, token: Option<&str>) -> SlotRequest {
    SlotRequest {
        position,
        occupant: SlotOccupant::Invite {
            email: email.to_string(),
            display_name: None,
            token: token.map(ToString::to_string),
        },
    }
}

pub fn request(format: MatchFormat, slots: Vec<SlotRequest>) -> CreateMatchRequest {
    CreateMatchRequest {
        sets: 3,
        match_type: MatchType::Friendly,
        counts_for_ranking: false,
        format,
        team_labels: TeamLabels::default(),
        club: None,
        court_number: None,
        notes: None,
        score: None,
        slots,
    }
}

/// Doubles match by `creator` at position 0 with placeholders elsewhere
pub async fn doubles_with_placeholders(ctx: &ServiceContext, creator: &Principal) -> CreateMatchResponse {
    let slots = vec![
        user_slot(0, creator.user_id.as_str()),
        placeholder_slot(1, "Bea"),
        placeholder_slot(2, "Carla"),
        placeholder_slot(3, "Dani"),
    ];
    MatchService::new(ctx)
        .create_match(creator, request(MatchFormat::Doubles, slots))
        .await
        .unwrap()
}
