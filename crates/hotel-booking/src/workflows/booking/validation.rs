use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{BookingDetails, BookingField};

/// Minimum raw character count accepted for a phone number.
pub const PHONE_MIN_CHARS: usize = 10;

/// Field-level messages produced by [`validate`]. Empty means the details are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<BookingField, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: BookingField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the message for a field, e.g. once the guest edits it.
    pub fn clear(&mut self, field: BookingField) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookingField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: BookingField, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// Check guest details against the booking form rules.
pub fn validate(details: &BookingDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if details.first_name.trim().is_empty() {
        errors.insert(BookingField::FirstName, "First name is required");
    }
    if details.last_name.trim().is_empty() {
        errors.insert(BookingField::LastName, "Last name is required");
    }
    if !details.email.contains('@') {
        errors.insert(BookingField::Email, "Valid email is required");
    }
    if details.phone.chars().count() < PHONE_MIN_CHARS {
        errors.insert(BookingField::Phone, "Valid phone number is required");
    }

    errors
}
