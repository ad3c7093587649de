use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Room, SearchCriteria};

/// Tax applied on top of the room subtotal, in percent.
pub const TAX_RATE_PERCENT: i64 = 15;

/// Cost breakdown for a stay. Amounts are whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub nights: i64,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Price a room for the stay described by the criteria.
pub fn quote(room: &Room, criteria: &SearchCriteria) -> PriceQuote {
    quote_for_rate(room.price_per_night, criteria.check_in, criteria.check_out)
}

/// Price a nightly rate between two dates.
///
/// Inverted ranges are not clamped; they produce negative nights and amounts. `tax` and
/// `total` are each rounded half-up from the subtotal rather than derived from one another.
pub fn quote_for_rate(
    price_per_night: u32,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> PriceQuote {
    let nights = (check_out - check_in).num_days();
    let subtotal = i64::from(price_per_night).saturating_mul(nights);
    let tax = round_half_up_percent(subtotal, TAX_RATE_PERCENT);
    let total = round_half_up_percent(subtotal, 100 + TAX_RATE_PERCENT);

    PriceQuote {
        nights,
        subtotal,
        tax,
        total,
    }
}

// floor(amount * percent / 100 + 1/2), exact for whole-unit amounts
fn round_half_up_percent(amount: i64, percent: i64) -> i64 {
    let scaled = i128::from(amount) * i128::from(percent) + 50;
    let rounded = scaled.div_euclid(100);
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
