//! Test-only builders for users, items and availability.

use chrono::NaiveDate;

use crate::{AvailabilityDay, GeoPoint, Item, Preference, TimeSlot, User};

/// Build a day with `free` open slots followed by `booked` booked slots.
#[must_use]
pub fn day_with_slots(date: NaiveDate, free: usize, booked: usize) -> AvailabilityDay {
    let open = (0..free).map(|hour| TimeSlot::open(format!("{:02}:00", 8 + hour)));
    let taken = (0..booked).map(|hour| TimeSlot::booked(format!("{:02}:30", 8 + hour)));
    AvailabilityDay::new(date, open.chain(taken).collect())
}

/// Unvalidated item builder, so tests can also express malformed records.
#[derive(Debug, Clone)]
pub struct ItemFixture {
    item: Item,
}

impl ItemFixture {
    /// Start an item with a neutral profile: rating 0, no bookings, no
    /// location and no availability.
    #[must_use]
    pub fn new(id: &str, category: &str) -> Self {
        Self {
            item: Item {
                id: id.to_owned(),
                category: category.to_owned(),
                rating: 0.0,
                total_bookings: 0,
                location: None,
                availability: Vec::new(),
            },
        }
    }

    /// Set the rating verbatim.
    #[must_use]
    pub fn rating(mut self, rating: f64) -> Self {
        self.item.rating = rating;
        self
    }

    /// Set the lifetime booking count.
    #[must_use]
    pub fn bookings(mut self, total_bookings: u64) -> Self {
        self.item.total_bookings = total_bookings;
        self
    }

    /// Place the item at `longitude`, `latitude`.
    #[must_use]
    pub fn at(mut self, longitude: f64, latitude: f64) -> Self {
        self.item.location = Some(GeoPoint {
            longitude,
            latitude,
        });
        self
    }

    /// Append an availability entry.
    #[must_use]
    pub fn day(mut self, day: AvailabilityDay) -> Self {
        self.item.availability.push(day);
        self
    }

    /// Finish the item.
    #[must_use]
    pub fn build(self) -> Item {
        self.item
    }
}

/// Unvalidated user with the given preferences and optional location.
#[must_use]
pub fn user_with(preferences: &[(&str, f64)], location: Option<(f64, f64)>) -> User {
    User {
        id: "user-1".to_owned(),
        preferences: preferences
            .iter()
            .map(|&(category, weight)| Preference {
                category: category.to_owned(),
                weight,
            })
            .collect(),
        location: location.map(|(longitude, latitude)| GeoPoint {
            longitude,
            latitude,
        }),
        booking_history: Vec::new(),
    }
}
