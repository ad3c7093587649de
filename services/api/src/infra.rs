use chrono::NaiveDate;
use hotel_booking::workflows::booking::sessions::{
    RepositoryError, SessionError, SessionId, SessionRepository, StateTransition,
};
use hotel_booking::workflows::booking::WizardState;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session store. Sessions vanish when the service restarts.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, WizardState>>>,
}

#[cfg(test)]
impl InMemorySessionRepository {
    pub(crate) fn len(&self) -> usize {
        self.sessions.lock().expect("session mutex poisoned").len()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, id: SessionId, state: WizardState) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, state);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<WizardState>, RepositoryError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_with(
        &self,
        id: &SessionId,
        transition: &mut StateTransition<'_>,
    ) -> Result<WizardState, SessionError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let current = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let next = transition(current)?;
        *current = next.clone();
        Ok(next)
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
