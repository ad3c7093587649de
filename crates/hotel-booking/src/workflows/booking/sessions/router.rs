use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::domain::{BookingDetails, RoomId};
use super::super::pricing;
use super::super::validation::{validate, ValidationErrors};
use super::super::views::{RoomOfferView, RoomSearchView, WizardView};
use super::super::wizard::{WizardAction, WizardError};
use super::repository::{RepositoryError, SessionError, SessionId, SessionRepository};
use super::service::WizardSessionService;

/// Optional overrides applied on top of the default search criteria.
#[derive(Debug, Default, Deserialize)]
pub struct RoomSearchQuery {
    pub guests: Option<u32>,
    pub bedrooms: Option<u32>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct ValidationView {
    pub valid: bool,
    pub errors: ValidationErrors,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub view: WizardView,
}

/// Router builder exposing the catalog, pricing, validation, and wizard session endpoints.
pub fn booking_router<R>(service: Arc<WizardSessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/rooms", get(list_rooms_handler::<R>))
        .route("/api/v1/rooms/:room_id", get(room_handler::<R>))
        .route("/api/v1/quote", post(quote_handler::<R>))
        .route("/api/v1/booking/validate", post(validate_handler))
        .route("/api/v1/wizard/sessions", post(start_session_handler::<R>))
        .route(
            "/api/v1/wizard/sessions/:session_id",
            get(session_handler::<R>).delete(end_session_handler::<R>),
        )
        .route(
            "/api/v1/wizard/sessions/:session_id/actions",
            post(action_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_rooms_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
    Query(query): Query<RoomSearchQuery>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let wizard = service.wizard();
    let mut criteria = wizard.default_criteria();
    if let Some(guests) = query.guests {
        criteria.guests = guests;
    }
    if let Some(bedrooms) = query.bedrooms {
        criteria.bedrooms = bedrooms;
    }
    if let Some(check_in) = query.check_in {
        criteria.check_in = check_in;
    }
    if let Some(check_out) = query.check_out {
        criteria.check_out = check_out;
    }

    let view = RoomSearchView::new(criteria, wizard.catalog().matching(&criteria));
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn room_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
    Path(room_id): Path<u32>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let wizard = service.wizard();
    match wizard.catalog().find(RoomId(room_id)) {
        Some(room) => {
            let view = RoomOfferView::new(room, &wizard.default_criteria());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        None => room_not_found(RoomId(room_id)),
    }
}

pub(crate) async fn quote_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.wizard().catalog().find(request.room_id) {
        Some(room) => {
            let quote =
                pricing::quote_for_rate(room.price_per_night, request.check_in, request.check_out);
            (StatusCode::OK, axum::Json(quote)).into_response()
        }
        None => room_not_found(request.room_id),
    }
}

pub(crate) async fn validate_handler(axum::Json(details): axum::Json<BookingDetails>) -> Response {
    let errors = validate(&details);
    let view = ValidationView {
        valid: errors.is_empty(),
        errors,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn start_session_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start() {
        Ok((session_id, state)) => {
            let view = SessionView {
                session_id,
                view: service.render(&state),
            };
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => session_error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let session_id = SessionId(session_id);
    match service.get(&session_id) {
        Ok(state) => {
            let view = SessionView {
                view: service.render(&state),
                session_id,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => session_error_response(error),
    }
}

pub(crate) async fn end_session_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.end(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => session_error_response(error),
    }
}

pub(crate) async fn action_handler<R>(
    State(service): State<Arc<WizardSessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(action): axum::Json<WizardAction>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let session_id = SessionId(session_id);
    match service.dispatch(&session_id, action) {
        Ok(state) => {
            let view = SessionView {
                view: service.render(&state),
                session_id,
            };
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => session_error_response(error),
    }
}

fn room_not_found(room_id: RoomId) -> Response {
    let payload = json!({
        "error": format!("room {room_id} not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn session_error_response(error: SessionError) -> Response {
    let status = match &error {
        SessionError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SessionError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SessionError::Wizard(WizardError::InvalidTransition { .. }) => StatusCode::CONFLICT,
        SessionError::Wizard(
            WizardError::RoomUnavailable(_)
            | WizardError::RoomBooked(_)
            | WizardError::EmptyParty { .. },
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
