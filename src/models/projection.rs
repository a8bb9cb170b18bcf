//! Local linear projection of geographic coordinates.
//!
//! A [`LocalScale`] measures how many meters one degree of latitude and
//! longitude spans at a given bounding box, then maps lat/lng pairs into a
//! flat `(x, y)` plane via plain multiplication. The result is a consistent
//! but not globally meaningful coordinate system: only differences between
//! two projected points taken under the *same* scale are valid distances.
//! The linearization degrades for boxes spanning large areas; it is intended
//! for city-scale viewports.

use crate::error::{AppError, Result};
use crate::models::{BoundingBox, Coordinates};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocalScale {
    pub meters_per_lat_deg: f64,
    pub meters_per_lng_deg: f64,
}

impl LocalScale {
    /// Derive the scale from a bounding box: haversine length of the west
    /// edge divided by the latitude span, and of the south edge divided by
    /// the longitude span.
    ///
    /// Returned by value rather than stashed in shared state, so every
    /// distance computation names the scale it runs under.
    pub fn project(bbox: &BoundingBox) -> Result<LocalScale> {
        let lat_span = bbox.lat_span();
        let lng_span = bbox.lng_span();
        if lat_span <= 0.0 || lng_span <= 0.0 {
            return Err(AppError::InvalidBoundingBox(format!(
                "Cannot project degenerate box (lat span {}, lng span {})",
                lat_span, lng_span
            )));
        }

        let west_edge_meters = bbox.south_west().distance_to(&bbox.north_west());
        let south_edge_meters = bbox.south_west().distance_to(&bbox.south_east());

        Ok(LocalScale {
            meters_per_lat_deg: west_edge_meters / lat_span,
            meters_per_lng_deg: south_edge_meters / lng_span,
        })
    }

    /// Map a coordinate into the local metric plane.
    pub fn to_local_xy(&self, coord: &Coordinates) -> [f64; 2] {
        [
            coord.lng * self.meters_per_lng_deg,
            coord.lat * self.meters_per_lat_deg,
        ]
    }
}
