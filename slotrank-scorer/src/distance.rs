//! Great-circle distance on a spherical Earth.

use geo::Point;
use slotrank_core::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Haversine distance between two positions given latitude first.
///
/// The result uses the unit of `radius_km`.
///
/// # Examples
/// ```
/// use slotrank_scorer::{EARTH_RADIUS_KM, haversine_km};
///
/// assert_eq!(haversine_km(51.5, -0.12, 51.5, -0.12, EARTH_RADIUS_KM), 0.0);
/// let one_degree = haversine_km(0.0, 0.0, 1.0, 0.0, EARTH_RADIUS_KM);
/// assert!((one_degree - 111.19).abs() < 0.01);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let half_chord = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push the chord marginally past one for antipodal points.
    let bounded = half_chord.clamp(0.0, 1.0);
    let angle = 2.0 * bounded.sqrt().atan2((1.0 - bounded).sqrt());
    radius_km * angle
}

/// Distance between two named positions.
///
/// Positions travel through `geo::Point` (`x = longitude`, `y = latitude`)
/// and reach [`haversine_km`] latitude first.
#[must_use]
pub fn great_circle_km(from: GeoPoint, to: GeoPoint, radius_km: f64) -> f64 {
    let origin = Point::from(from);
    let destination = Point::from(to);
    haversine_km(
        origin.y(),
        origin.x(),
        destination.y(),
        destination.x(),
        radius_km,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE_KM: f64 = 0.5;

    fn point(longitude: f64, latitude: f64) -> GeoPoint {
        GeoPoint {
            longitude,
            latitude,
        }
    }

    #[rstest]
    fn identical_points_are_zero_apart() {
        let here = point(-3.19, 55.95);
        assert_eq!(great_circle_km(here, here, EARTH_RADIUS_KM), 0.0);
    }

    #[rstest]
    // London to Paris.
    #[case(point(-0.1276, 51.5072), point(2.3522, 48.8566), 343.5)]
    // New York to Los Angeles.
    #[case(point(-74.006, 40.7128), point(-118.2437, 34.0522), 3_935.7)]
    fn matches_known_city_distances(
        #[case] from: GeoPoint,
        #[case] to: GeoPoint,
        #[case] expected_km: f64,
    ) {
        let distance = great_circle_km(from, to, EARTH_RADIUS_KM);
        assert!(
            (distance - expected_km).abs() < TOLERANCE_KM,
            "expected about {expected_km} km, got {distance}"
        );
    }

    #[rstest]
    fn is_symmetric() {
        let from = point(151.2, -33.87);
        let to = point(174.76, -36.85);
        let there = great_circle_km(from, to, EARTH_RADIUS_KM);
        let back = great_circle_km(to, from, EARTH_RADIUS_KM);
        assert!((there - back).abs() < 1e-9);
    }

    #[rstest]
    fn swapping_axes_changes_the_answer() {
        // One degree of latitude and one of longitude differ away from the
        // equator, so reading the stored pair in the wrong order is visible.
        let from = point(10.0, 60.0);
        let to = point(11.0, 60.0);
        let correct = great_circle_km(from, to, EARTH_RADIUS_KM);
        let swapped = haversine_km(10.0, 60.0, 11.0, 60.0, EARTH_RADIUS_KM);
        assert!((correct - 55.6).abs() < TOLERANCE_KM);
        assert!((swapped - correct).abs() > 50.0);
    }

    #[rstest]
    fn antipodes_are_half_the_circumference() {
        let distance = great_circle_km(point(0.0, 0.0), point(180.0, 0.0), EARTH_RADIUS_KM);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half_circumference).abs() < 1e-6);
    }
}
