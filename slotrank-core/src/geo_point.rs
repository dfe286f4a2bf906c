//! Geographic positions with explicitly named axes.
//!
//! Stored records encode positions as `[longitude, latitude]` arrays, while
//! great-circle maths conventionally reads latitude first. [`GeoPoint`] names
//! both axes so callers never have to remember which index is which.

use geo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A WGS84 position in decimal degrees.
///
/// Serialises as `[longitude, latitude]` to match the stored schema.
///
/// # Examples
/// ```
/// use slotrank_core::GeoPoint;
///
/// let point = GeoPoint::new(-0.1276, 51.5072).expect("valid coordinates");
/// assert_eq!(point.latitude, 51.5072);
///
/// let json = serde_json::to_string(&point).expect("serialise");
/// assert_eq!(json, "[-0.1276,51.5072]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    /// East-west position in degrees, `-180.0..=180.0`.
    pub longitude: f64,
    /// North-south position in degrees, `-90.0..=90.0`.
    pub latitude: f64,
}

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Longitude was not finite or fell outside `-180.0..=180.0`.
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
    /// Latitude was not finite or fell outside `-90.0..=90.0`.
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),
}

impl GeoPoint {
    /// Validate and construct a position from longitude and latitude.
    ///
    /// # Errors
    /// Returns [`GeoPointError`] when either axis is non-finite or out of
    /// range.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeoPointError> {
        let point = Self {
            longitude,
            latitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Check the axes of an already constructed position.
    ///
    /// # Errors
    /// Returns [`GeoPointError`] when either axis is non-finite or out of
    /// range.
    pub fn validate(&self) -> Result<(), GeoPointError> {
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoPointError::LongitudeOutOfRange(self.longitude));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoPointError::LatitudeOutOfRange(self.latitude));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.longitude, point.latitude]
    }
}

/// `geo` points use `x = longitude` and `y = latitude`.
impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self::new(point.longitude, point.latitude)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self {
            longitude: point.x(),
            latitude: point.y(),
        }
    }
}
