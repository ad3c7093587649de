use super::domain::{Room, RoomId, SearchCriteria};
use super::filter::filter_rooms;

#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn standard() -> Self {
        Self {
            rooms: standard_rooms(),
        }
    }

    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn find(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn matching(&self, criteria: &SearchCriteria) -> Vec<&Room> {
        filter_rooms(criteria, &self.rooms)
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_rooms() -> Vec<Room> {
    vec![
        Room {
            id: RoomId(1),
            name: "Deluxe Room",
            description: "Spacious room with city views and modern Ethiopian decor",
            price_per_night: 250,
            image_ref: "/luxury-hotel-room-modern-design.jpg",
            amenities: vec![
                "Free WiFi",
                "Air Conditioning",
                "Flat-screen TV",
                "Ensuite Bathroom",
            ],
            capacity: 2,
            bedrooms: 1,
            available: true,
        },
        Room {
            id: RoomId(2),
            name: "Premium Suite",
            description: "Elegant suite with separate living area and panoramic mountain views",
            price_per_night: 400,
            image_ref: "/luxury-hotel-suite-mountain-view.jpg",
            amenities: vec![
                "Free WiFi",
                "Air Conditioning",
                "Living Room",
                "Work Desk",
                "Minibar",
            ],
            capacity: 3,
            bedrooms: 1,
            available: true,
        },
        Room {
            id: RoomId(3),
            name: "Executive Room",
            description: "Premium room with executive lounge access and local art collection",
            price_per_night: 350,
            image_ref: "/luxury-hotel-executive-room-elegant.jpg",
            amenities: vec![
                "Free WiFi",
                "Lounge Access",
                "Bathrobe & Slippers",
                "Premium Toiletries",
            ],
            capacity: 2,
            bedrooms: 1,
            available: true,
        },
        Room {
            id: RoomId(4),
            name: "Penthouse",
            description: "Ultimate luxury with 360-degree views of Addis Ababa and the Entoto Mountains",
            price_per_night: 600,
            image_ref: "/luxury-penthouse-suite-city-view.jpg",
            amenities: vec![
                "Personal Concierge",
                "Private Elevator",
                "Infinity View",
                "Spa Services",
            ],
            capacity: 4,
            bedrooms: 2,
            available: true,
        },
        Room {
            id: RoomId(5),
            name: "Family Suite",
            description: "Perfect for families with connecting rooms and child-friendly amenities",
            price_per_night: 450,
            image_ref: "/room.jpg",
            amenities: vec![
                "Free WiFi",
                "Connecting Rooms",
                "Children's Amenities",
                "Kitchenette",
            ],
            capacity: 5,
            bedrooms: 2,
            available: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_rooms_in_order() {
        let catalog = RoomCatalog::standard();
        let ids: Vec<u32> = catalog.rooms().iter().map(|room| room.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn find_returns_none_for_unknown_rooms() {
        let catalog = RoomCatalog::standard();
        assert_eq!(
            catalog.find(RoomId(4)).map(|room| room.name),
            Some("Penthouse")
        );
        assert!(catalog.find(RoomId(42)).is_none());
    }
}
