//! Users and their category preferences.
//!
//! Fields stay public so records loaded from storage can be represented as
//! they are, including malformed ones. The validating constructors are the
//! data-entry boundary: use them wherever new records are created.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GeoPoint, GeoPointError};

/// A user's affinity for one item category.
///
/// # Examples
/// ```
/// use slotrank_core::Preference;
///
/// let preference = Preference::new("spa", 0.8).expect("valid preference");
/// assert_eq!(preference.category, "spa");
/// assert!(Preference::new("spa", 1.2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    /// Category name, compared exactly against [`Item::category`](crate::Item).
    pub category: String,
    /// Affinity in `0.0..=1.0`.
    pub weight: f64,
}

/// Errors returned by [`Preference::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreferenceError {
    /// The category was empty or whitespace.
    #[error("preference category must not be empty")]
    EmptyCategory,
    /// The weight was non-finite or outside `0.0..=1.0`.
    #[error("preference weight {weight} for `{category}` must be between 0.0 and 1.0")]
    WeightOutOfRange {
        /// Category carrying the bad weight.
        category: String,
        /// Rejected weight.
        weight: f64,
    },
}

impl Preference {
    /// Validate and construct a [`Preference`].
    ///
    /// # Errors
    /// Returns [`PreferenceError`] for an empty category or a weight outside
    /// `0.0..=1.0`.
    pub fn new(category: impl Into<String>, weight: f64) -> Result<Self, PreferenceError> {
        let preference = Self {
            category: category.into(),
            weight,
        };
        preference.validate()?;
        Ok(preference)
    }

    /// Check an existing preference.
    ///
    /// # Errors
    /// Returns [`PreferenceError`] for an empty category or a weight outside
    /// `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.category.trim().is_empty() {
            return Err(PreferenceError::EmptyCategory);
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(PreferenceError::WeightOutOfRange {
                category: self.category.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

/// A person requesting recommendations.
///
/// # Examples
/// ```
/// use slotrank_core::{GeoPoint, Preference, User};
///
/// let user = User::new(
///     "u-1",
///     vec![Preference::new("spa", 0.8).expect("valid preference")],
///     Some(GeoPoint::new(0.0, 0.0).expect("valid point")),
/// )
/// .expect("valid user");
/// assert_eq!(user.preference_for("spa").map(|p| p.weight), Some(0.8));
/// assert!(user.preference_for("gym").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Category preferences. Categories are expected, not required, to be
    /// unique.
    #[serde(default)]
    pub preferences: Vec<Preference>,
    /// Home position, when known.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Identifiers of past bookings. Carried for context only.
    #[serde(default)]
    pub booking_history: Vec<String>,
}

/// Errors returned by [`User::new`] and [`User::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UserError {
    /// The identifier was empty or whitespace.
    #[error("user id must not be empty")]
    EmptyId,
    /// A preference failed validation.
    #[error(transparent)]
    Preference(#[from] PreferenceError),
    /// The home position failed validation.
    #[error("invalid user location: {0}")]
    Location(#[from] GeoPointError),
}

impl User {
    /// Validate and construct a [`User`] with an empty booking history.
    ///
    /// # Errors
    /// Returns [`UserError`] when the id is empty, a preference is invalid,
    /// or the location is out of range.
    pub fn new(
        id: impl Into<String>,
        preferences: Vec<Preference>,
        location: Option<GeoPoint>,
    ) -> Result<Self, UserError> {
        let user = Self {
            id: id.into(),
            preferences,
            location,
            booking_history: Vec::new(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Attach booking history while returning `self` for chaining.
    #[must_use]
    pub fn with_booking_history(mut self, booking_history: Vec<String>) -> Self {
        self.booking_history = booking_history;
        self
    }

    /// Check every field of an existing user.
    ///
    /// # Errors
    /// Returns the first [`UserError`] found.
    pub fn validate(&self) -> Result<(), UserError> {
        if self.id.trim().is_empty() {
            return Err(UserError::EmptyId);
        }
        for preference in &self.preferences {
            preference.validate()?;
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }

    /// Return the first preference whose category equals `category` exactly.
    #[must_use]
    pub fn preference_for(&self, category: &str) -> Option<&Preference> {
        self.preferences
            .iter()
            .find(|preference| preference.category == category)
    }
}
