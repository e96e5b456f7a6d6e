//! Business logic services
//!
//! Every mutation runs as a single call into [`with_transaction`], so a
//! rejected rule or a store failure leaves prior state untouched.

pub mod context;
pub mod error;
pub mod invitation;
pub mod padel_match;
pub mod result;
pub mod slot;
pub mod team;
pub mod transaction;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invitation::InvitationService;
pub use padel_match::MatchService;
pub use result::ResultService;
pub use slot::SlotService;
pub use team::TeamService;
pub use transaction::with_transaction;
pub use user::UserService;
