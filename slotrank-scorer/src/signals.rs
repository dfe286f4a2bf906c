//! The five sub-scores.
//!
//! Each function reads one signal and maps it onto `0.0..=1.0` for valid
//! input. Values are trusted as stored: a weight above one or a rating above
//! the ceiling passes straight through.

use chrono::NaiveDate;
use slotrank_core::{AvailabilityDay, GeoPoint, Item, User};

use crate::{
    config::{ScoreCeilings, ScoreDefaults},
    distance::great_circle_km,
};

/// Category affinity of `user` for `category`.
///
/// Users without preferences get the neutral fallback; users whose
/// preferences do not mention the category get the (lower) unmatched
/// fallback. Otherwise the first matching weight is returned verbatim.
#[must_use]
pub fn preference_score(user: &User, category: &str, defaults: &ScoreDefaults) -> f64 {
    if user.preferences.is_empty() {
        return defaults.neutral_preference;
    }
    user.preference_for(category)
        .map_or(defaults.unmatched_preference, |preference| {
            if !(0.0..=1.0).contains(&preference.weight) {
                log::warn!(
                    "user {} stores out-of-range weight {} for `{category}`",
                    user.id,
                    preference.weight
                );
            }
            preference.weight
        })
}

/// Booking count relative to the saturation ceiling.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "booking counts are normalised against a float ceiling"
)]
pub fn popularity_score(total_bookings: u64, ceilings: &ScoreCeilings) -> f64 {
    (total_bookings as f64 / ceilings.max_bookings as f64).min(1.0)
}

/// Rating relative to the rating ceiling, without clamping.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "ratings are normalised by division"
)]
pub fn rating_score(rating: f64, ceilings: &ScoreCeilings) -> f64 {
    rating / ceilings.max_rating
}

/// Proximity of the item to the user.
///
/// Falls back to the neutral value when either side lacks coordinates and
/// floors at zero beyond the distance ceiling.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distance decays linearly up to the ceiling"
)]
pub fn location_score(
    user_location: Option<GeoPoint>,
    item_location: Option<GeoPoint>,
    ceilings: &ScoreCeilings,
    defaults: &ScoreDefaults,
) -> f64 {
    let (Some(from), Some(to)) = (user_location, item_location) else {
        return defaults.neutral_location;
    };
    let distance = great_circle_km(from, to, ceilings.earth_radius_km);
    (1.0 - distance / ceilings.max_distance_km).max(0.0)
}

/// Share of free slots on `date`.
///
/// An item with no entry for the date scores zero, as does a day that lists
/// no slots at all.
#[must_use]
pub fn availability_score(item: &Item, date: NaiveDate) -> f64 {
    item.availability_on(date)
        .map_or(0.0, |day| free_slot_ratio(&item.id, day))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "slot counts become a ratio"
)]
fn free_slot_ratio(item_id: &str, day: &AvailabilityDay) -> f64 {
    let total = day.total_slots();
    if total == 0 {
        log::debug!("item {item_id} lists no slots on {}", day.date);
        return 0.0;
    }
    day.free_slots() as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use slotrank_core::test_support::{ItemFixture, day_with_slots, user_with};

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).expect("valid test date")
    }

    #[fixture]
    fn ceilings() -> ScoreCeilings {
        ScoreCeilings::default()
    }

    #[fixture]
    fn defaults() -> ScoreDefaults {
        ScoreDefaults::default()
    }

    #[rstest]
    #[case("spa")]
    #[case("gym")]
    #[case("")]
    fn no_preferences_is_neutral(defaults: ScoreDefaults, #[case] category: &str) {
        let user = user_with(&[], None);
        assert_eq!(preference_score(&user, category, &defaults), 0.5);
    }

    #[rstest]
    #[case("spa", 0.8)]
    #[case("gym", 0.3)]
    fn matching_and_unmatched_categories(
        defaults: ScoreDefaults,
        #[case] category: &str,
        #[case] expected: f64,
    ) {
        let user = user_with(&[("spa", 0.8)], None);
        assert_eq!(preference_score(&user, category, &defaults), expected);
    }

    #[rstest]
    fn duplicate_categories_use_the_first(defaults: ScoreDefaults) {
        let user = user_with(&[("spa", 0.1), ("spa", 0.9)], None);
        assert_eq!(preference_score(&user, "spa", &defaults), 0.1);
    }

    #[rstest]
    fn stored_weights_pass_through_unclamped(defaults: ScoreDefaults) {
        let user = user_with(&[("spa", 3.0)], None);
        assert_eq!(preference_score(&user, "spa", &defaults), 3.0);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(250, 0.25)]
    #[case(1_000, 1.0)]
    #[case(2_000, 1.0)]
    #[case(u64::MAX, 1.0)]
    fn popularity_saturates(ceilings: ScoreCeilings, #[case] bookings: u64, #[case] expected: f64) {
        assert_eq!(popularity_score(bookings, &ceilings), expected);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(2.5, 0.5)]
    #[case(5.0, 1.0)]
    #[case(7.0, 1.4)]
    #[case(-1.0, -0.2)]
    fn rating_is_not_clamped(ceilings: ScoreCeilings, #[case] rating: f64, #[case] expected: f64) {
        assert!((rating_score(rating, &ceilings) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn same_position_scores_one(ceilings: ScoreCeilings, defaults: ScoreDefaults) {
        let here = Some(GeoPoint {
            longitude: 0.0,
            latitude: 0.0,
        });
        assert_eq!(location_score(here, here, &ceilings, &defaults), 1.0);
    }

    #[rstest]
    // About 55.6 km and 111.2 km north of the origin.
    #[case(0.0, 0.5)]
    #[case(0.0, 1.0)]
    #[case(90.0, 45.0)]
    fn beyond_ceiling_scores_zero(
        ceilings: ScoreCeilings,
        defaults: ScoreDefaults,
        #[case] longitude: f64,
        #[case] latitude: f64,
    ) {
        let origin = Some(GeoPoint {
            longitude: 0.0,
            latitude: 0.0,
        });
        let far = Some(GeoPoint {
            longitude,
            latitude,
        });
        assert_eq!(location_score(origin, far, &ceilings, &defaults), 0.0);
    }

    #[rstest]
    #[case(0.0, 0.449_660_803_361_2)]
    #[case(0.317_974_497_453_8, 0.317_974_497_453_8)]
    fn exactly_at_ceiling_scores_zero(
        defaults: ScoreDefaults,
        #[case] longitude: f64,
        #[case] latitude: f64,
    ) {
        let origin = GeoPoint {
            longitude: 0.0,
            latitude: 0.0,
        };
        let edge = GeoPoint {
            longitude,
            latitude,
        };
        // Roughly 50 km out; the ceiling is pinned to the computed distance.
        let radius = ScoreCeilings::default().earth_radius_km;
        let ceilings = ScoreCeilings {
            max_distance_km: great_circle_km(origin, edge, radius),
            ..ScoreCeilings::default()
        };
        assert_eq!(
            location_score(Some(origin), Some(edge), &ceilings, &defaults),
            0.0
        );
    }

    #[rstest]
    fn just_inside_default_ceiling_scores_positive(
        ceilings: ScoreCeilings,
        defaults: ScoreDefaults,
    ) {
        let origin = Some(GeoPoint {
            longitude: 0.0,
            latitude: 0.0,
        });
        // About 49.9 km north.
        let near = Some(GeoPoint {
            longitude: 0.0,
            latitude: 0.449,
        });
        let score = location_score(origin, near, &ceilings, &defaults);
        assert!(score > 0.0 && score < 0.01, "got {score}");
    }

    #[rstest]
    fn halfway_scores_half(defaults: ScoreDefaults) {
        // Along a meridian distance is proportional to the latitude change.
        let ceilings = ScoreCeilings {
            max_distance_km: 111.194_926_644_558_73,
            ..ScoreCeilings::default()
        };
        let origin = Some(GeoPoint {
            longitude: 0.0,
            latitude: 0.0,
        });
        let half_degree = Some(GeoPoint {
            longitude: 0.0,
            latitude: 0.5,
        });
        let score = location_score(origin, half_degree, &ceilings, &defaults);
        assert!((score - 0.5).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    #[case(false, false)]
    fn missing_coordinates_are_neutral(
        ceilings: ScoreCeilings,
        defaults: ScoreDefaults,
        #[case] user_known: bool,
        #[case] item_known: bool,
    ) {
        let point = GeoPoint {
            longitude: 1.0,
            latitude: 1.0,
        };
        let score = location_score(
            user_known.then_some(point),
            item_known.then_some(point),
            &ceilings,
            &defaults,
        );
        assert_eq!(score, 0.5);
    }

    #[rstest]
    #[case(3, 1, 0.75)]
    #[case(1, 1, 0.5)]
    #[case(0, 4, 0.0)]
    #[case(2, 0, 1.0)]
    fn availability_is_the_free_share(
        #[case] free: usize,
        #[case] booked: usize,
        #[case] expected: f64,
    ) {
        let item = ItemFixture::new("i-1", "spa")
            .day(day_with_slots(may(1), free, booked))
            .build();
        assert_eq!(availability_score(&item, may(1)), expected);
    }

    #[rstest]
    fn missing_date_scores_zero() {
        let item = ItemFixture::new("i-1", "spa")
            .day(day_with_slots(may(2), 4, 0))
            .build();
        assert_eq!(availability_score(&item, may(1)), 0.0);
    }

    #[rstest]
    fn zero_slot_day_scores_zero() {
        let item = ItemFixture::new("i-1", "spa")
            .day(day_with_slots(may(1), 0, 0))
            .build();
        assert!(item.availability_on(may(1)).is_some());
        assert_eq!(availability_score(&item, may(1)), 0.0);
    }
}
