use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::catalog::RoomCatalog;
use super::confirmation::ConfirmationCodeGenerator;
use super::domain::{
    BookingDetails, BookingField, BookingRecord, Room, RoomId, SearchCriteria, StayDefaults,
};
use super::filter::filter_rooms;
use super::pricing;
use super::validation::{validate, ValidationErrors};

/// Screens of the booking flow, in the order a guest moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Home,
    Results,
    Details,
    Booking,
    Confirmation,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Home,
            Self::Results,
            Self::Details,
            Self::Booking,
            Self::Confirmation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Results => "Available Rooms",
            Self::Details => "Room Details",
            Self::Booking => "Complete Your Booking",
            Self::Confirmation => "Booking Confirmed",
        }
    }

    /// Actions the screen accepts, by [`WizardAction::name`].
    pub const fn accepted_actions(self) -> &'static [&'static str] {
        match self {
            Self::Home => &["search"],
            Self::Results => &["refine_search", "reset_filters", "select_room", "back"],
            Self::Details => &["book_now", "back"],
            Self::Booking => &["edit_field", "submit_booking", "back"],
            Self::Confirmation => &["back_to_home"],
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User actions reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardAction {
    Search { criteria: SearchCriteria },
    RefineSearch { criteria: SearchCriteria },
    ResetFilters,
    SelectRoom { room_id: RoomId },
    BookNow,
    EditField { field: BookingField, value: String },
    SubmitBooking,
    Back,
    BackToHome,
}

impl WizardAction {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::RefineSearch { .. } => "refine_search",
            Self::ResetFilters => "reset_filters",
            Self::SelectRoom { .. } => "select_room",
            Self::BookNow => "book_now",
            Self::EditField { .. } => "edit_field",
            Self::SubmitBooking => "submit_booking",
            Self::Back => "back",
            Self::BackToHome => "back_to_home",
        }
    }
}

/// Draft guest details on the booking screen together with the errors from the last submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingForm {
    pub details: BookingDetails,
    pub errors: ValidationErrors,
}

/// Snapshot of one visitor's progress through the flow.
///
/// Only [`BookingWizard::apply`] produces non-initial states, which keeps the screen
/// invariants intact: Details and Booking always carry a selected room, Booking carries a
/// form, and Confirmation carries a booking record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    step: WizardStep,
    criteria: SearchCriteria,
    selected_room: Option<Room>,
    form: Option<BookingForm>,
    booking: Option<BookingRecord>,
}

impl WizardState {
    pub fn initial(criteria: SearchCriteria) -> Self {
        Self {
            step: WizardStep::Home,
            criteria,
            selected_room: None,
            form: None,
            booking: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.selected_room.as_ref()
    }

    pub fn form(&self) -> Option<&BookingForm> {
        self.form.as_ref()
    }

    pub fn booking(&self) -> Option<&BookingRecord> {
        self.booking.as_ref()
    }
}

/// Errors raised when an action does not apply to the current screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("action `{action}` is not available on the {step} screen")]
    InvalidTransition {
        step: WizardStep,
        action: &'static str,
    },
    #[error("room {0} is not offered for the current search")]
    RoomUnavailable(RoomId),
    #[error("room {0} is already booked")]
    RoomBooked(RoomId),
    #[error("{field} must be at least 1")]
    EmptyParty { field: &'static str },
}

/// Transition rules for the booking flow.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    catalog: RoomCatalog,
    defaults: StayDefaults,
    codes: ConfirmationCodeGenerator,
    today: Option<NaiveDate>,
}

impl BookingWizard {
    pub fn new(
        catalog: RoomCatalog,
        defaults: StayDefaults,
        codes: ConfirmationCodeGenerator,
    ) -> Self {
        Self {
            catalog,
            defaults,
            codes,
            today: None,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            RoomCatalog::standard(),
            StayDefaults::default(),
            ConfirmationCodeGenerator::default(),
        )
    }

    /// Pin the date used for default criteria instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn default_criteria(&self) -> SearchCriteria {
        self.defaults.criteria(self.today())
    }

    pub fn start(&self) -> WizardState {
        WizardState::initial(self.default_criteria())
    }

    /// Rooms offered for the state's current criteria.
    pub fn offered_rooms(&self, state: &WizardState) -> Vec<&Room> {
        filter_rooms(&state.criteria, self.catalog.rooms())
    }

    /// Apply a user action, returning the next state. The input state is never modified, so
    /// a rejected action leaves the caller's state as it was.
    pub fn apply<R>(
        &self,
        state: &WizardState,
        action: WizardAction,
        rng: &mut R,
    ) -> Result<WizardState, WizardError>
    where
        R: Rng + ?Sized,
    {
        let step = state.step;
        let action_name = action.name();
        let rejected = WizardError::InvalidTransition {
            step,
            action: action_name,
        };

        let next = match (step, action) {
            (WizardStep::Home, WizardAction::Search { criteria }) => WizardState {
                step: WizardStep::Results,
                criteria: checked_party(criteria)?,
                selected_room: None,
                form: None,
                booking: None,
            },
            (WizardStep::Results, WizardAction::RefineSearch { criteria }) => WizardState {
                criteria: checked_party(criteria)?,
                ..state.clone()
            },
            (WizardStep::Results, WizardAction::ResetFilters) => WizardState {
                criteria: self.default_criteria(),
                ..state.clone()
            },
            (WizardStep::Results, WizardAction::SelectRoom { room_id }) => {
                let room = self
                    .offered_rooms(state)
                    .into_iter()
                    .find(|room| room.id == room_id)
                    .cloned()
                    .ok_or(WizardError::RoomUnavailable(room_id))?;
                if !room.available {
                    return Err(WizardError::RoomBooked(room_id));
                }

                WizardState {
                    step: WizardStep::Details,
                    selected_room: Some(room),
                    ..state.clone()
                }
            }
            (WizardStep::Results, WizardAction::Back) => WizardState {
                step: WizardStep::Home,
                ..state.clone()
            },
            (WizardStep::Details, WizardAction::BookNow) => WizardState {
                step: WizardStep::Booking,
                form: Some(BookingForm::default()),
                ..state.clone()
            },
            (WizardStep::Details, WizardAction::Back) => WizardState {
                step: WizardStep::Results,
                selected_room: None,
                ..state.clone()
            },
            (WizardStep::Booking, WizardAction::EditField { field, value }) => {
                let mut form = state.form.clone().ok_or(rejected)?;
                form.details.set(field, value);
                form.errors.clear(field);

                WizardState {
                    form: Some(form),
                    ..state.clone()
                }
            }
            (WizardStep::Booking, WizardAction::SubmitBooking) => {
                return self.submit(state, rng);
            }
            (WizardStep::Booking, WizardAction::Back) => WizardState {
                step: WizardStep::Details,
                form: None,
                ..state.clone()
            },
            (WizardStep::Confirmation, WizardAction::BackToHome) => WizardState {
                step: WizardStep::Home,
                selected_room: None,
                form: None,
                booking: None,
                ..state.clone()
            },
            _ => return Err(rejected),
        };

        debug!(from = %step, to = %next.step, action = action_name, "wizard transition");
        Ok(next)
    }

    fn submit<R>(&self, state: &WizardState, rng: &mut R) -> Result<WizardState, WizardError>
    where
        R: Rng + ?Sized,
    {
        let rejected = WizardError::InvalidTransition {
            step: state.step,
            action: "submit_booking",
        };
        let room = state.selected_room.clone().ok_or(rejected.clone())?;
        let mut form = state.form.clone().ok_or(rejected)?;

        let errors = validate(&form.details);
        if !errors.is_empty() {
            debug!(errors = errors.len(), "booking details rejected");
            form.errors = errors;
            return Ok(WizardState {
                form: Some(form),
                ..state.clone()
            });
        }

        let quote = pricing::quote(&room, &state.criteria);
        let confirmation_code = self.codes.generate(rng);
        info!(
            code = %confirmation_code,
            room = room.name,
            nights = quote.nights,
            total = quote.total,
            "booking confirmed"
        );

        let record = BookingRecord {
            guest: form.details,
            room: room.clone(),
            criteria: state.criteria,
            quote,
            total_price: quote.total,
            confirmation_code,
        };

        Ok(WizardState {
            step: WizardStep::Confirmation,
            criteria: state.criteria,
            selected_room: Some(room),
            form: None,
            booking: Some(record),
        })
    }
}

fn checked_party(criteria: SearchCriteria) -> Result<SearchCriteria, WizardError> {
    if criteria.guests == 0 {
        return Err(WizardError::EmptyParty { field: "guests" });
    }
    if criteria.bedrooms == 0 {
        return Err(WizardError::EmptyParty { field: "bedrooms" });
    }
    Ok(criteria)
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::standard()
    }
}
