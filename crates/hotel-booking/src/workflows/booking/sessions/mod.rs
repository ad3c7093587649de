//! Per-visitor wizard sessions and the HTTP surface that drives them.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{
    RepositoryError, SessionError, SessionId, SessionRepository, StateTransition,
};
pub use router::{booking_router, RoomSearchQuery, SessionView, ValidationView};
pub use service::WizardSessionService;
