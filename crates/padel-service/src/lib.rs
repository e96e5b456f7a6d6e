//! # padel-service
//!
//! Application layer containing the match lifecycle use cases, the
//! transaction combinator they run in, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    with_transaction, InvitationService, MatchService, ResultService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SlotService, TeamService, UserService,
};
