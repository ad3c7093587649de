use serde::{Deserialize, Serialize};
use std::fmt;

use super::super::wizard::{WizardError, WizardState};

/// Identifier handed to a visitor when their booking flow starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transition applied to a stored state while the repository holds it exclusively.
pub type StateTransition<'a> = dyn FnMut(&WizardState) -> Result<WizardState, SessionError> + 'a;

/// Storage abstraction for in-flight wizard sessions.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, id: SessionId, state: WizardState) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<WizardState>, RepositoryError>;
    /// Replace the stored state with the transition's output. Implementations must not let
    /// another update for the same session interleave, and must keep the old state when the
    /// transition fails.
    fn update_with(
        &self,
        id: &SessionId,
        transition: &mut StateTransition<'_>,
    ) -> Result<WizardState, SessionError>;
    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Error raised while driving a stored session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}
