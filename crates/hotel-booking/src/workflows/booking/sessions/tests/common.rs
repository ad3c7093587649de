use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::booking::sessions::repository::{
    RepositoryError, SessionError, SessionId, SessionRepository, StateTransition,
};
use crate::workflows::booking::sessions::{booking_router, WizardSessionService};
use crate::workflows::booking::{
    BookingWizard, ConfirmationCodeGenerator, RoomCatalog, RoomId, StayDefaults, WizardState,
};

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    sessions: Arc<Mutex<HashMap<SessionId, WizardState>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, id: SessionId, state: WizardState) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, state);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<WizardState>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_with(
        &self,
        id: &SessionId,
        transition: &mut StateTransition<'_>,
    ) -> Result<WizardState, SessionError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        let current = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let next = transition(current)?;
        *current = next.clone();
        Ok(next)
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _id: SessionId, _state: WizardState) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<WizardState>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update_with(
        &self,
        _id: &SessionId,
        _transition: &mut StateTransition<'_>,
    ) -> Result<WizardState, SessionError> {
        Err(RepositoryError::Unavailable("offline".to_string()).into())
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

pub(super) fn wizard() -> BookingWizard {
    BookingWizard::standard().with_today(today())
}

pub(super) fn build_service() -> (
    WizardSessionService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = WizardSessionService::new(repository.clone(), wizard());
    (service, repository)
}

/// Service whose catalog marks `booked` as taken.
pub(super) fn build_service_with_booked(
    booked: RoomId,
) -> WizardSessionService<MemoryRepository> {
    let mut rooms = RoomCatalog::standard().rooms().to_vec();
    for room in rooms.iter_mut().filter(|room| room.id == booked) {
        room.available = false;
    }
    let wizard = BookingWizard::new(
        RoomCatalog::from_rooms(rooms),
        StayDefaults::default(),
        ConfirmationCodeGenerator::default(),
    )
    .with_today(today());
    WizardSessionService::new(Arc::new(MemoryRepository::default()), wizard)
}

pub(super) fn router_with_service(
    service: WizardSessionService<MemoryRepository>,
) -> axum::Router {
    booking_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
