//! Distance → travel time → rating conversion and per-profile averaging.

use crate::constants::{
    RATING_CEILING, RATING_CEILING_MINUTES, RATING_FALLOFF_NUMERATOR,
    WALKING_SPEED_METERS_PER_HOUR,
};
use crate::error::{AppError, Result};
use crate::models::{Catalog, Coordinates, RatingProfile};
use crate::services::amenity_index::AmenityIndex;

/// Walking time in minutes for a distance in meters, at a constant 5 km/h.
pub fn time_minutes(distance_meters: f64) -> f64 {
    distance_meters / WALKING_SPEED_METERS_PER_HOUR * 60.0
}

/// Rating on `(0, 5]` for a travel time in minutes. Flat ceiling of 5 below
/// 2.5 minutes ("already close enough"), hyperbolic falloff beyond it.
/// Monotonically non-increasing, positive everywhere, approaching 0 as time
/// grows.
pub fn rating(time_minutes: f64) -> f64 {
    if time_minutes < RATING_CEILING_MINUTES {
        RATING_CEILING
    } else {
        RATING_FALLOFF_NUMERATOR / time_minutes
    }
}

/// Computes per-category and profile-averaged ratings against a loaded
/// [`AmenityIndex`]. Holds the catalog so profiles resolve by name.
pub struct RatingEngine {
    catalog: Catalog,
}

impl RatingEngine {
    pub fn new(catalog: Catalog) -> Result<Self> {
        catalog.validate()?;
        Ok(RatingEngine { catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rating for one category at a point, or `None` if the category has no
    /// indexed amenities in the loaded box.
    pub fn category_rating(
        index: &AmenityIndex,
        category: &str,
        coord: &Coordinates,
    ) -> Option<f64> {
        index
            .nearest_distance_meters(category, coord)
            .map(|distance| rating(time_minutes(distance)))
    }

    /// Average rating over the profile's categories that are present in the
    /// index. Absent categories are excluded from both numerator and
    /// denominator; when none are present the result is a defined `0.0`
    /// rather than a division by zero.
    pub fn profile_rating(
        index: &AmenityIndex,
        profile: &RatingProfile,
        coord: &Coordinates,
    ) -> f64 {
        let ratings: Vec<f64> = profile
            .categories
            .iter()
            .filter_map(|name| Self::category_rating(index, name, coord))
            .collect();

        if ratings.is_empty() {
            return 0.0;
        }
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }

    /// Resolve a profile by name and average it at a point.
    pub fn average_rating(
        &self,
        index: &AmenityIndex,
        profile_name: &str,
        coord: &Coordinates,
    ) -> Result<f64> {
        let profile = self
            .catalog
            .profile(profile_name)
            .ok_or_else(|| AppError::Config(format!("Unknown rating profile: {}", profile_name)))?;
        Ok(Self::profile_rating(index, profile, coord))
    }
}
