//! Bookable items and their per-date availability.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GeoPoint, GeoPointError};

/// Highest rating an item may carry.
pub const MAX_RATING: f64 = 5.0;

/// One bookable time slot on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Free-form slot label, e.g. `"10:00-11:00"`.
    pub time: String,
    /// Whether the slot is already taken.
    #[serde(default)]
    pub is_booked: bool,
}

impl TimeSlot {
    /// Construct an unbooked slot.
    pub fn open(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            is_booked: false,
        }
    }

    /// Construct a booked slot.
    pub fn booked(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            is_booked: true,
        }
    }
}

/// The slots an item offers on one calendar date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use slotrank_core::{AvailabilityDay, TimeSlot};
///
/// let day = AvailabilityDay::new(
///     NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
///     vec![TimeSlot::open("09:00"), TimeSlot::booked("10:00")],
/// );
/// assert_eq!(day.free_slots(), 1);
/// assert!(!day.is_fully_booked());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDay {
    /// Calendar date, normalised to UTC when read from a timestamp.
    #[serde(with = "crate::calendar::serde_date")]
    pub date: NaiveDate,
    /// Slots offered on `date`.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl AvailabilityDay {
    /// Construct a day from its slots.
    #[must_use]
    pub const fn new(date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        Self { date, slots }
    }

    /// Number of slots offered.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots not yet booked.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_booked).count()
    }

    /// True when no slot can be booked, including days with no slots.
    #[must_use]
    pub fn is_fully_booked(&self) -> bool {
        self.free_slots() == 0
    }
}

/// A venue or slot that can be booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Category name used for preference matching.
    pub category: String,
    /// Average rating in `0.0..=5.0`.
    #[serde(default)]
    pub rating: f64,
    /// Lifetime booking count.
    #[serde(default)]
    pub total_bookings: u64,
    /// Position of the item. Malformed records may lack one.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// One entry per calendar date.
    #[serde(default)]
    pub availability: Vec<AvailabilityDay>,
}

/// Errors returned by [`Item::new`] and [`Item::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemError {
    /// The identifier was empty or whitespace.
    #[error("item id must not be empty")]
    EmptyId,
    /// The category was empty or whitespace.
    #[error("item category must not be empty")]
    EmptyCategory,
    /// The rating was non-finite or outside `0.0..=5.0`.
    #[error("rating {0} must be between 0.0 and 5.0")]
    RatingOutOfRange(f64),
    /// The position failed validation.
    #[error("invalid item location: {0}")]
    Location(#[from] GeoPointError),
    /// The same calendar date appeared twice in the availability list.
    #[error("availability lists {0} more than once")]
    DuplicateDate(NaiveDate),
}

impl Item {
    /// Validate and construct an [`Item`].
    ///
    /// # Errors
    /// Returns [`ItemError`] for empty identifiers, ratings outside
    /// `0.0..=5.0`, bad coordinates, or repeated availability dates.
    ///
    /// # Examples
    /// ```
    /// use slotrank_core::{GeoPoint, Item, ItemError};
    ///
    /// let origin = GeoPoint::new(0.0, 0.0).expect("valid point");
    /// assert!(Item::new("i-1", "spa", 4.5, 120, origin, Vec::new()).is_ok());
    /// assert_eq!(
    ///     Item::new("i-2", "spa", 7.0, 120, origin, Vec::new()),
    ///     Err(ItemError::RatingOutOfRange(7.0)),
    /// );
    /// ```
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        rating: f64,
        total_bookings: u64,
        location: GeoPoint,
        availability: Vec<AvailabilityDay>,
    ) -> Result<Self, ItemError> {
        let item = Self {
            id: id.into(),
            category: category.into(),
            rating,
            total_bookings,
            location: Some(location),
            availability,
        };
        item.validate()?;
        Ok(item)
    }

    /// Check every field of an existing item.
    ///
    /// A missing location is tolerated here; scoring treats it as unknown.
    ///
    /// # Errors
    /// Returns the first [`ItemError`] found.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.id.trim().is_empty() {
            return Err(ItemError::EmptyId);
        }
        if self.category.trim().is_empty() {
            return Err(ItemError::EmptyCategory);
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ItemError::RatingOutOfRange(self.rating));
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        let mut seen = HashSet::with_capacity(self.availability.len());
        for day in &self.availability {
            if !seen.insert(day.date) {
                return Err(ItemError::DuplicateDate(day.date));
            }
        }
        Ok(())
    }

    /// Return the first availability entry for `date`.
    #[must_use]
    pub fn availability_on(&self, date: NaiveDate) -> Option<&AvailabilityDay> {
        self.availability.iter().find(|day| day.date == date)
    }

    /// True when `date` has no entry or every slot on it is booked.
    #[must_use]
    pub fn is_fully_booked_on(&self, date: NaiveDate) -> bool {
        self.availability_on(date)
            .is_none_or(AvailabilityDay::is_fully_booked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).expect("valid test date")
    }

    #[fixture]
    fn origin() -> GeoPoint {
        GeoPoint {
            longitude: 0.0,
            latitude: 0.0,
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(5.0)]
    fn accepts_boundary_ratings(origin: GeoPoint, #[case] rating: f64) {
        let built = Item::new("i-1", "spa", rating, 0, origin, Vec::new());
        assert!(built.is_ok(), "rating {rating} should be accepted");
    }

    #[rstest]
    #[case(-0.5)]
    #[case(7.0)]
    #[case(f64::NAN)]
    fn rejects_out_of_range_ratings(origin: GeoPoint, #[case] rating: f64) {
        let err = Item::new("i-1", "spa", rating, 0, origin, Vec::new())
            .expect_err("rating should be rejected");
        assert!(matches!(err, ItemError::RatingOutOfRange(_)));
    }

    #[rstest]
    fn rejects_duplicate_dates(origin: GeoPoint) {
        let days = vec![
            AvailabilityDay::new(date(1), Vec::new()),
            AvailabilityDay::new(date(1), vec![TimeSlot::open("09:00")]),
        ];
        let err = Item::new("i-1", "spa", 4.0, 0, origin, days).expect_err("duplicate date");
        assert_eq!(err, ItemError::DuplicateDate(date(1)));
    }

    #[rstest]
    fn rejects_empty_category(origin: GeoPoint) {
        let err = Item::new("i-1", "", 4.0, 0, origin, Vec::new()).expect_err("empty category");
        assert_eq!(err, ItemError::EmptyCategory);
    }

    #[rstest]
    fn looks_up_availability_by_date(origin: GeoPoint) {
        let days = vec![
            AvailabilityDay::new(date(1), vec![TimeSlot::booked("09:00")]),
            AvailabilityDay::new(date(2), vec![TimeSlot::open("09:00")]),
        ];
        let item = Item::new("i-1", "spa", 4.0, 0, origin, days).expect("valid item");
        assert!(item.is_fully_booked_on(date(1)));
        assert!(!item.is_fully_booked_on(date(2)));
        assert!(item.is_fully_booked_on(date(3)));
        assert_eq!(
            item.availability_on(date(2)).map(|d| d.free_slots()),
            Some(1)
        );
    }

    #[rstest]
    fn zero_slot_day_counts_as_fully_booked() {
        assert!(AvailabilityDay::new(date(1), Vec::new()).is_fully_booked());
    }

    #[rstest]
    fn decodes_stored_record_with_timestamps() {
        let json = r#"{
            "id": "i-7",
            "category": "spa",
            "rating": 4.2,
            "totalBookings": 310,
            "location": [2.35, 48.85],
            "availability": [
                {
                    "date": "2024-05-01T00:00:00.000Z",
                    "slots": [
                        {"time": "10:00", "isBooked": false},
                        {"time": "11:00", "isBooked": true}
                    ]
                }
            ]
        }"#;
        let item: Item = serde_json::from_str(json).expect("decode item");
        assert_eq!(item.total_bookings, 310);
        let day = item.availability_on(date(1)).expect("entry for 1 May");
        assert_eq!((day.free_slots(), day.total_slots()), (1, 2));
    }
}
