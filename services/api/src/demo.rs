use crate::infra::parse_date;
use chrono::NaiveDate;
use clap::Args;
use hotel_booking::config::BookingConfig;
use hotel_booking::error::AppError;
use hotel_booking::workflows::booking::pricing::quote_for_rate;
use hotel_booking::workflows::booking::views::{RoomSearchView, WizardView};
use hotel_booking::workflows::booking::{
    BookingField, BookingWizard, PriceQuote, RoomId, SearchCriteria, WizardAction, WizardError,
    WizardState, WizardStep,
};

#[derive(Args, Debug, Default)]
pub(crate) struct RoomsArgs {
    /// Number of guests (defaults to the configured party size)
    #[arg(long)]
    pub(crate) guests: Option<u32>,
    /// Minimum number of bedrooms
    #[arg(long)]
    pub(crate) bedrooms: Option<u32>,
    /// Check-in date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) check_in: Option<NaiveDate>,
    /// Check-out date (YYYY-MM-DD). Defaults to check-in plus the configured stay length.
    #[arg(long, value_parser = parse_date)]
    pub(crate) check_out: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Catalog room id
    #[arg(long)]
    pub(crate) room: u32,
    /// Check-in date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) check_in: Option<NaiveDate>,
    /// Check-out date (YYYY-MM-DD). Defaults to check-in plus the configured stay length.
    #[arg(long, value_parser = parse_date)]
    pub(crate) check_out: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Room to book. Defaults to the first room offered for the search.
    #[arg(long)]
    pub(crate) room: Option<u32>,
    /// Number of guests in the search
    #[arg(long)]
    pub(crate) guests: Option<u32>,
    /// Override today's date (YYYY-MM-DD) used for the default stay
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Submit an incomplete guest form first to show inline validation
    #[arg(long)]
    pub(crate) show_validation: bool,
}

fn demo_wizard(today: Option<NaiveDate>) -> BookingWizard {
    let wizard = BookingConfig::default().wizard();
    match today {
        Some(today) => wizard.with_today(today),
        None => wizard,
    }
}

fn criteria_from(
    wizard: &BookingWizard,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> SearchCriteria {
    let defaults = wizard.default_criteria();
    let check_in = check_in.unwrap_or(defaults.check_in);
    let stay = defaults.check_out - defaults.check_in;
    let check_out = check_out.unwrap_or(check_in + stay);
    SearchCriteria {
        check_in,
        check_out,
        ..defaults
    }
}

pub(crate) fn run_rooms(args: RoomsArgs) -> Result<(), AppError> {
    let RoomsArgs {
        guests,
        bedrooms,
        check_in,
        check_out,
    } = args;

    let wizard = demo_wizard(None);
    let mut criteria = criteria_from(&wizard, check_in, check_out);
    if let Some(guests) = guests {
        criteria.guests = guests;
    }
    if let Some(bedrooms) = bedrooms {
        criteria.bedrooms = bedrooms;
    }

    let view = RoomSearchView::new(criteria, wizard.catalog().matching(&criteria));
    render_room_search(&view);
    Ok(())
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let wizard = demo_wizard(None);
    let criteria = criteria_from(&wizard, args.check_in, args.check_out);
    let room_id = RoomId(args.room);

    let Some(room) = wizard.catalog().find(room_id) else {
        println!("Room {room_id} is not in the catalog");
        for room in wizard.catalog().rooms() {
            println!("- {}: {}", room.id, room.name);
        }
        return Ok(());
    };

    let quote = quote_for_rate(room.price_per_night, criteria.check_in, criteria.check_out);
    println!(
        "{} ({} -> {}) at ${}/night",
        room.name, criteria.check_in, criteria.check_out, room.price_per_night
    );
    render_quote(&quote);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        room,
        guests,
        today,
        show_validation,
    } = args;

    let wizard = demo_wizard(today);
    let mut rng = rand::thread_rng();
    let mut criteria = wizard.default_criteria();
    if let Some(guests) = guests {
        criteria.guests = guests;
    }

    println!("Hotel booking wizard demo");
    let mut state = wizard.start();
    render_screen(&wizard, &state);

    state = wizard.apply(&state, WizardAction::Search { criteria }, &mut rng)?;
    render_screen(&wizard, &state);

    let room_id = match room {
        Some(id) => RoomId(id),
        None => {
            if first_offered(&wizard, &state).is_none() {
                println!("\nNo rooms fit this search; resetting filters");
                state = wizard.apply(&state, WizardAction::ResetFilters, &mut rng)?;
                render_screen(&wizard, &state);
            }
            first_offered(&wizard, &state).ok_or(WizardError::InvalidTransition {
                step: WizardStep::Results,
                action: "select_room",
            })?
        }
    };

    state = wizard.apply(&state, WizardAction::SelectRoom { room_id }, &mut rng)?;
    render_screen(&wizard, &state);

    state = wizard.apply(&state, WizardAction::BookNow, &mut rng)?;

    if show_validation {
        state = wizard.apply(&state, WizardAction::SubmitBooking, &mut rng)?;
        render_screen(&wizard, &state);
    }

    for (field, value) in [
        (BookingField::FirstName, "Selam"),
        (BookingField::LastName, "Tesfaye"),
        (BookingField::Email, "selam@example.com"),
        (BookingField::Phone, "+251 911 000 000"),
        (BookingField::SpecialRequests, "Airport pickup on arrival"),
    ] {
        state = wizard.apply(
            &state,
            WizardAction::EditField {
                field,
                value: value.to_string(),
            },
            &mut rng,
        )?;
    }
    render_screen(&wizard, &state);

    state = wizard.apply(&state, WizardAction::SubmitBooking, &mut rng)?;
    render_screen(&wizard, &state);

    state = wizard.apply(&state, WizardAction::BackToHome, &mut rng)?;
    render_screen(&wizard, &state);

    Ok(())
}

fn first_offered(wizard: &BookingWizard, state: &WizardState) -> Option<RoomId> {
    wizard
        .offered_rooms(state)
        .into_iter()
        .find(|room| room.available)
        .map(|room| room.id)
}

fn render_screen(wizard: &BookingWizard, state: &WizardState) {
    let view = WizardView::render(wizard, state);
    println!("\n== {} ==", view.step_label);

    match view.step {
        WizardStep::Home => {
            let criteria = view.criteria;
            println!(
                "Search: {} -> {}, {} {}",
                criteria.check_in,
                criteria.check_out,
                criteria.guests,
                plural(i64::from(criteria.guests), "guest")
            );
        }
        WizardStep::Results => {
            let rooms = view.results.unwrap_or_default();
            let search = RoomSearchView {
                criteria: view.criteria,
                nights: view.nights,
                rooms,
            };
            render_room_search(&search);
        }
        WizardStep::Details => {
            if let Some(offer) = &view.selected_room {
                println!("{}: {}", offer.room.name, offer.room.description);
                println!(
                    "Sleeps {}, {} {}",
                    offer.room.capacity,
                    offer.room.bedrooms,
                    plural(i64::from(offer.room.bedrooms), "bedroom")
                );
                println!("Amenities: {}", offer.room.amenities.join(", "));
                render_quote(&offer.quote);
            }
        }
        WizardStep::Booking => {
            if let Some(form) = &view.form {
                for field in BookingField::ordered() {
                    let value = form.details.value(field);
                    match form.errors.get(field) {
                        Some(message) => {
                            println!("- {}: '{}' ({})", field.label(), value, message)
                        }
                        None => println!("- {}: '{}'", field.label(), value),
                    }
                }
            }
        }
        WizardStep::Confirmation => {
            if let Some(booking) = &view.booking {
                println!("Confirmation number: {}", booking.confirmation_code);
                println!(
                    "{} booked the {} for {} {}",
                    booking.guest.full_name(),
                    booking.room.name,
                    booking.quote.nights,
                    plural(booking.quote.nights, "night")
                );
                render_quote(&booking.quote);
            }
        }
    }
}

fn render_room_search(view: &RoomSearchView) {
    let criteria = view.criteria;
    println!(
        "{} {} for {} {} ({} -> {})",
        view.nights,
        plural(view.nights, "night"),
        criteria.guests,
        plural(i64::from(criteria.guests), "guest"),
        criteria.check_in,
        criteria.check_out
    );

    if view.rooms.is_empty() {
        println!("No rooms match these filters. Reset filters to see every room.");
        return;
    }

    for offer in &view.rooms {
        println!(
            "- [{}] {} | ${}/night | sleeps {} | {} {} | total ${}",
            offer.room.id,
            offer.room.name,
            offer.room.price_per_night,
            offer.room.capacity,
            offer.room.bedrooms,
            plural(i64::from(offer.room.bedrooms), "bedroom"),
            offer.quote.subtotal
        );
    }
}

fn render_quote(quote: &PriceQuote) {
    println!(
        "Room rate ({} {}): ${}",
        quote.nights,
        plural(quote.nights, "night"),
        quote.subtotal
    );
    println!("Taxes & fees: ${}", quote.tax);
    println!("Total: ${}", quote.total);
}

fn plural(count: i64, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
    }

    #[test]
    fn criteria_keep_default_stay_length_when_only_check_in_given() {
        let wizard = demo_wizard(Some(date(1)));
        let criteria = criteria_from(&wizard, Some(date(10)), None);
        assert_eq!(criteria.check_in, date(10));
        assert_eq!(criteria.check_out, date(13));
        assert_eq!(criteria.guests, 2);
    }

    #[test]
    fn plural_only_singular_for_one() {
        assert_eq!(plural(1, "night"), "night");
        assert_eq!(plural(0, "night"), "nights");
        assert_eq!(plural(-2, "night"), "nights");
    }

    #[test]
    fn demo_runs_to_completion() {
        let args = DemoArgs {
            room: Some(5),
            guests: Some(4),
            today: Some(date(1)),
            show_validation: true,
        };
        run_demo(args).expect("demo completes");
    }

    #[test]
    fn demo_rejects_rooms_outside_the_search() {
        let args = DemoArgs {
            room: Some(1),
            guests: Some(4),
            today: Some(date(1)),
            show_validation: false,
        };
        let err = run_demo(args).expect_err("deluxe room sleeps two");
        assert!(err.to_string().contains("room 1"));
    }
}
