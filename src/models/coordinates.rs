use crate::constants::EARTH_RADIUS_METERS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Great-circle distance to another coordinate using the haversine
    /// formula. Returns meters.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

/// Geographic bounding box in degrees. Edges are named after compass
/// directions; `south < north` and `west < east` are enforced at
/// construction so downstream projection math cannot divide by zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, String> {
        Coordinates::new(south, west)?;
        Coordinates::new(north, east)?;
        if south >= north {
            return Err(format!(
                "Degenerate latitude span: south {} must be below north {}",
                south, north
            ));
        }
        if west >= east {
            return Err(format!(
                "Degenerate longitude span: west {} must be below east {}",
                west, east
            ));
        }
        Ok(BoundingBox {
            south,
            west,
            north,
            east,
        })
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn south_west(&self) -> Coordinates {
        Coordinates {
            lat: self.south,
            lng: self.west,
        }
    }

    pub fn north_west(&self) -> Coordinates {
        Coordinates {
            lat: self.north,
            lng: self.west,
        }
    }

    pub fn south_east(&self) -> Coordinates {
        Coordinates {
            lat: self.south,
            lng: self.east,
        }
    }

    pub fn contains(&self, coord: &Coordinates) -> bool {
        (self.south..=self.north).contains(&coord.lat)
            && (self.west..=self.east).contains(&coord.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(48.8566, 2.3522).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_distance_calculation() {
        let paris = Coordinates::new(48.8566, 2.3522).unwrap();
        let london = Coordinates::new(51.5074, -0.1278).unwrap();

        let distance = paris.distance_to(&london);
        // Paris to London is approximately 344 km
        assert!((distance - 344_000.0).abs() < 10_000.0);
    }

    #[test]
    fn test_bounding_box_validation() {
        assert!(BoundingBox::new(55.7, 37.5, 55.8, 37.7).is_ok());
        // Zero-height and inverted boxes are rejected
        assert!(BoundingBox::new(55.7, 37.5, 55.7, 37.7).is_err());
        assert!(BoundingBox::new(55.8, 37.5, 55.7, 37.7).is_err());
        // Zero-width
        assert!(BoundingBox::new(55.7, 37.7, 55.8, 37.7).is_err());
        // Out-of-range corner
        assert!(BoundingBox::new(-95.0, 0.0, 10.0, 1.0).is_err());
    }

    #[test]
    fn test_bounding_box_contains() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(bbox.contains(&Coordinates { lat: 0.5, lng: 0.5 }));
        assert!(bbox.contains(&bbox.south_west()));
        assert!(!bbox.contains(&Coordinates { lat: 1.5, lng: 0.5 }));
    }
}
