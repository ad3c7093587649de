use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::super::views::WizardView;
use super::super::wizard::{BookingWizard, WizardAction, WizardState};
use super::repository::{RepositoryError, SessionError, SessionId, SessionRepository};

/// Service pairing the wizard's transition rules with a session store.
pub struct WizardSessionService<R> {
    repository: Arc<R>,
    wizard: Arc<BookingWizard>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("wiz-{id:06}"))
}

impl<R> WizardSessionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, wizard: BookingWizard) -> Self {
        Self {
            repository,
            wizard: Arc::new(wizard),
        }
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    /// Open a new session on the home screen with default criteria.
    pub fn start(&self) -> Result<(SessionId, WizardState), SessionError> {
        let id = next_session_id();
        let state = self.wizard.start();
        self.repository.insert(id.clone(), state.clone())?;
        info!(session = %id, "booking session started");
        Ok((id, state))
    }

    pub fn get(&self, id: &SessionId) -> Result<WizardState, SessionError> {
        let state = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(state)
    }

    /// Apply a user action to the stored session and persist the resulting state.
    pub fn dispatch(
        &self,
        id: &SessionId,
        action: WizardAction,
    ) -> Result<WizardState, SessionError> {
        let wizard = Arc::clone(&self.wizard);
        let mut action = Some(action);
        let mut transition = |state: &WizardState| -> Result<WizardState, SessionError> {
            let action = action.take().ok_or_else(|| {
                RepositoryError::Unavailable("transition invoked more than once".to_string())
            })?;
            let next = wizard.apply(state, action, &mut rand::thread_rng())?;
            Ok(next)
        };
        self.repository.update_with(id, &mut transition)
    }

    /// Discard a session, e.g. when the visitor abandons the flow.
    pub fn end(&self, id: &SessionId) -> Result<(), SessionError> {
        self.repository.remove(id)?;
        info!(session = %id, "booking session ended");
        Ok(())
    }

    pub fn render(&self, state: &WizardState) -> WizardView {
        WizardView::render(&self.wizard, state)
    }
}
