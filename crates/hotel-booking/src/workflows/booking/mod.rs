//! Room catalog, pricing, guest validation, and the booking wizard.

pub mod catalog;
pub mod confirmation;
pub mod domain;
mod filter;
pub mod pricing;
pub mod sessions;
pub mod validation;
pub mod views;
mod wizard;

pub use catalog::RoomCatalog;
pub use confirmation::{ConfirmationCode, ConfirmationCodeGenerator};
pub use domain::{
    BookingDetails, BookingField, BookingRecord, Room, RoomId, SearchCriteria, StayDefaults,
};
pub use filter::{filter_rooms, matches};
pub use pricing::{quote, PriceQuote};
pub use validation::{validate, ValidationErrors};
pub use wizard::{BookingForm, BookingWizard, WizardAction, WizardError, WizardState, WizardStep};
