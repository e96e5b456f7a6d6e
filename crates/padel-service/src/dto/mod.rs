//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AcceptInvitationRequest, CreateMatchRequest, ListMatchesQuery, ReleaseSlotRequest,
    RenameSlotRequest, RenameTeamRequest, SearchPlayersQuery, SlotOccupant, SlotRequest,
    SubmitResultRequest, TeamLabels, UpdateMatchRequest,
};

pub use responses::{
    CreateMatchResponse, HealthChecks, HealthResponse, InvitationLinkResponse, JoinBlockReason,
    JoinLinkResponse, MatchResponse, MatchSummaryResponse, PublicUserResponse, ReadinessResponse,
    ScoreResponse, SetResponse, SlotPreviewResponse, SlotResponse, SlotState, TeamResponse,
    UserResponse, ViewerResponse,
};

pub use mappers::{MatchView, SlotView, SummaryView};
