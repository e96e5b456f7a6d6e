//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod health;
pub mod matches;
pub mod session;
pub mod slots;
pub mod users;
