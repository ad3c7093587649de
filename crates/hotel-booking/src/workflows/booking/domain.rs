use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::confirmation::ConfirmationCode;
use super::pricing::PriceQuote;

/// Identifier wrapper for catalog rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable room offering. Catalog entries are constant for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: &'static str,
    pub description: &'static str,
    /// Nightly rate in whole currency units.
    pub price_per_night: u32,
    pub image_ref: &'static str,
    pub amenities: Vec<&'static str>,
    pub capacity: u32,
    pub bedrooms: u32,
    pub available: bool,
}

const fn default_bedrooms() -> u32 {
    1
}

/// Search parameters submitted from the home screen.
///
/// `check_out` is expected to fall after `check_in` but this is never enforced; an inverted
/// range simply produces zero or negative nights downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    #[serde(default = "default_bedrooms")]
    pub bedrooms: u32,
}

impl SearchCriteria {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate, guests: u32) -> Self {
        Self {
            check_in,
            check_out,
            guests,
            bedrooms: default_bedrooms(),
        }
    }

    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = bedrooms;
        self
    }

    /// Criteria shown on a fresh page load: a three night stay for two starting today.
    pub fn defaults_for(today: NaiveDate) -> Self {
        StayDefaults::default().criteria(today)
    }

    /// Whole calendar days between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Dials for the criteria a visitor starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayDefaults {
    pub nights: u32,
    pub guests: u32,
}

impl StayDefaults {
    pub fn criteria(&self, today: NaiveDate) -> SearchCriteria {
        SearchCriteria::new(
            today,
            today + Duration::days(i64::from(self.nights)),
            self.guests,
        )
    }
}

impl Default for StayDefaults {
    fn default() -> Self {
        Self {
            nights: 3,
            guests: 2,
        }
    }
}

/// Guest detail form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    FirstName,
    LastName,
    Email,
    Phone,
    SpecialRequests,
}

impl BookingField {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::FirstName,
            Self::LastName,
            Self::Email,
            Self::Phone,
            Self::SpecialRequests,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::SpecialRequests => "Special Requests",
        }
    }
}

/// Guest details collected on the booking screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl BookingDetails {
    /// Replace a single field with raw user input. Blank special requests are dropped.
    pub fn set(&mut self, field: BookingField, value: String) {
        match field {
            BookingField::FirstName => self.first_name = value,
            BookingField::LastName => self.last_name = value,
            BookingField::Email => self.email = value,
            BookingField::Phone => self.phone = value,
            BookingField::SpecialRequests => {
                self.special_requests = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                };
            }
        }
    }

    pub fn value(&self, field: BookingField) -> &str {
        match field {
            BookingField::FirstName => &self.first_name,
            BookingField::LastName => &self.last_name,
            BookingField::Email => &self.email,
            BookingField::Phone => &self.phone,
            BookingField::SpecialRequests => self.special_requests.as_deref().unwrap_or(""),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Completed booking shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRecord {
    pub guest: BookingDetails,
    pub room: Room,
    pub criteria: SearchCriteria,
    pub quote: PriceQuote,
    /// Tax-inclusive total charged for the stay.
    pub total_price: i64,
    pub confirmation_code: ConfirmationCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn defaults_cover_three_nights_for_two() {
        let today = date(2024, 12, 30);
        let criteria = SearchCriteria::defaults_for(today);

        assert_eq!(criteria.check_in, today);
        assert_eq!(criteria.check_out, date(2025, 1, 2));
        assert_eq!(criteria.guests, 2);
        assert_eq!(criteria.bedrooms, 1);
        assert_eq!(criteria.nights(), 3);
    }

    #[test]
    fn nights_go_negative_for_inverted_ranges() {
        let criteria = SearchCriteria::new(date(2024, 3, 10), date(2024, 3, 8), 1);
        assert_eq!(criteria.nights(), -2);
    }

    #[test]
    fn criteria_deserialize_with_default_bedrooms() {
        let criteria: SearchCriteria = serde_json::from_str(
            r#"{"check_in":"2024-01-01","check_out":"2024-01-04","guests":3}"#,
        )
        .expect("criteria parse");

        assert_eq!(criteria.bedrooms, 1);
        assert_eq!(criteria.guests, 3);
    }

    #[test]
    fn blank_special_requests_are_dropped() {
        let mut details = BookingDetails::default();
        details.set(BookingField::SpecialRequests, "   ".to_string());
        assert_eq!(details.special_requests, None);

        details.set(BookingField::SpecialRequests, "Late arrival".to_string());
        assert_eq!(details.value(BookingField::SpecialRequests), "Late arrival");
    }
}
