use super::domain::{Room, SearchCriteria};

/// Whether a room can host the requested party.
pub fn matches(room: &Room, criteria: &SearchCriteria) -> bool {
    room.capacity >= criteria.guests && room.bedrooms >= criteria.bedrooms
}

/// Select the rooms that fit the criteria, keeping the order they were supplied in.
///
/// An empty result is a normal outcome; callers render an empty state rather than an error.
pub fn filter_rooms<'a, I>(criteria: &SearchCriteria, rooms: I) -> Vec<&'a Room>
where
    I: IntoIterator<Item = &'a Room>,
{
    rooms
        .into_iter()
        .filter(|room| matches(room, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::booking::catalog::RoomCatalog;
    use chrono::NaiveDate;

    fn criteria(guests: u32, bedrooms: u32) -> SearchCriteria {
        let check_in = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let check_out = NaiveDate::from_ymd_opt(2024, 1, 4).expect("valid date");
        SearchCriteria::new(check_in, check_out, guests).with_bedrooms(bedrooms)
    }

    fn names<'a>(rooms: &[&'a Room]) -> Vec<&'a str> {
        rooms.iter().map(|room| room.name).collect()
    }

    #[test]
    fn two_guests_one_bedroom_matches_whole_catalog() {
        let catalog = RoomCatalog::standard();
        let rooms = filter_rooms(&criteria(2, 1), catalog.rooms());
        assert_eq!(rooms.len(), 5);
    }

    #[test]
    fn larger_parties_narrow_results_in_catalog_order() {
        let catalog = RoomCatalog::standard();

        let three = filter_rooms(&criteria(3, 1), catalog.rooms());
        assert_eq!(
            names(&three),
            vec!["Premium Suite", "Penthouse", "Family Suite"]
        );

        let two_bedrooms = filter_rooms(&criteria(1, 2), catalog.rooms());
        assert_eq!(names(&two_bedrooms), vec!["Penthouse", "Family Suite"]);
    }

    #[test]
    fn oversized_party_yields_empty_result() {
        let catalog = RoomCatalog::standard();
        assert!(filter_rooms(&criteria(6, 1), catalog.rooms()).is_empty());
        assert!(filter_rooms(&criteria(2, 3), catalog.rooms()).is_empty());
    }

    #[test]
    fn filtering_twice_returns_same_rooms() {
        let catalog = RoomCatalog::standard();
        for guests in 1..=6 {
            for bedrooms in 1..=3 {
                let search = criteria(guests, bedrooms);
                let first = filter_rooms(&search, catalog.rooms());
                let second = filter_rooms(&search, first.iter().copied());
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn excluded_rooms_fail_at_least_one_requirement() {
        let catalog = RoomCatalog::standard();
        for guests in 1..=6 {
            for bedrooms in 1..=3 {
                let search = criteria(guests, bedrooms);
                let selected = filter_rooms(&search, catalog.rooms());
                for room in catalog.rooms() {
                    let fits = room.capacity >= guests && room.bedrooms >= bedrooms;
                    assert_eq!(selected.contains(&room), fits, "room {}", room.name);
                }
            }
        }
    }
}
