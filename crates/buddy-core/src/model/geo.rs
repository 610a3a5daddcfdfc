use serde::{Deserialize, Serialize};

use crate::error::BuddyResult;
use crate::params::{require_latitude, require_longitude};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const METERS_PER_MILE: f64 = 1_609.344;
const METERS_PER_YARD: f64 = 0.9144;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> BuddyResult<Self> {
        Ok(Self {
            latitude: require_latitude(latitude)?,
            longitude: require_longitude(longitude)?,
        })
    }

    /// The service's "no location" coordinate.
    pub const fn origin() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::origin()
    }
}

/// Great-circle distance, precomputed in the units the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub meters: f64,
    pub kilometers: f64,
    pub miles: f64,
    pub yards: f64,
}

impl Distance {
    pub fn from_meters(meters: f64) -> Self {
        Self {
            meters,
            kilometers: meters / 1_000.0,
            miles: meters / METERS_PER_MILE,
            yards: meters / METERS_PER_YARD,
        }
    }

    /// Haversine distance between two points.
    pub fn between(from: GeoPoint, to: GeoPoint) -> Self {
        let (lat1, lat2) = (from.latitude.to_radians(), to.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lng = (to.longitude - from.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Self::from_meters(EARTH_RADIUS_METERS * c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(95.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert_eq!(GeoPoint::default(), GeoPoint::origin());
    }

    #[test]
    fn test_distance_between_known_cities() {
        // Seattle to Portland is roughly 234 km.
        let seattle = GeoPoint::new(47.6062, -122.3321).unwrap();
        let portland = GeoPoint::new(45.5152, -122.6784).unwrap();
        let d = Distance::between(seattle, portland);
        assert!((d.kilometers - 234.0).abs() < 3.0, "got {}", d.kilometers);
        assert!((d.miles - d.meters / METERS_PER_MILE).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance() {
        let p = GeoPoint::new(10.0, 10.0).unwrap();
        assert_eq!(Distance::between(p, p).meters, 0.0);
    }
}
