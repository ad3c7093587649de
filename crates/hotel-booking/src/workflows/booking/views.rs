use serde::Serialize;

use super::domain::{BookingRecord, Room, SearchCriteria};
use super::pricing::{self, PriceQuote};
use super::wizard::{BookingForm, BookingWizard, WizardState, WizardStep};

#[derive(Debug, Clone, Serialize)]
pub struct RoomOfferView {
    pub room: Room,
    pub quote: PriceQuote,
}

impl RoomOfferView {
    pub fn new(room: &Room, criteria: &SearchCriteria) -> Self {
        Self {
            room: room.clone(),
            quote: pricing::quote(room, criteria),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomSearchView {
    pub criteria: SearchCriteria,
    pub nights: i64,
    pub rooms: Vec<RoomOfferView>,
}

impl RoomSearchView {
    pub fn new<'a, I>(criteria: SearchCriteria, rooms: I) -> Self
    where
        I: IntoIterator<Item = &'a Room>,
    {
        Self {
            criteria,
            nights: criteria.nights(),
            rooms: rooms
                .into_iter()
                .map(|room| RoomOfferView::new(room, &criteria))
                .collect(),
        }
    }
}

/// Everything a presentation layer needs to render the current screen.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: WizardStep,
    pub step_label: &'static str,
    pub criteria: SearchCriteria,
    pub nights: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RoomOfferView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_room: Option<RoomOfferView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<BookingForm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingRecord>,
    pub accepted_actions: &'static [&'static str],
}

impl WizardView {
    pub fn render(wizard: &BookingWizard, state: &WizardState) -> Self {
        let step = state.step();
        let criteria = *state.criteria();

        let results = (step == WizardStep::Results).then(|| {
            RoomSearchView::new(criteria, wizard.offered_rooms(state)).rooms
        });

        Self {
            step,
            step_label: step.label(),
            criteria,
            nights: criteria.nights(),
            results,
            selected_room: state
                .selected_room()
                .map(|room| RoomOfferView::new(room, &criteria)),
            form: state.form().cloned(),
            booking: state.booking().cloned(),
            accepted_actions: step.accepted_actions(),
        }
    }
}
