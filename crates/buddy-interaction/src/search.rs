//! Geographic search filters shared by every "find nearby" operation.

use chrono::{DateTime, NaiveDateTime};

use buddy_core::BuddyResult;
use buddy_core::ParamBag;
use buddy_core::model::GeoPoint;
use buddy_core::params::{DEFAULT_RECORD_LIMIT, UNBOUNDED_DISTANCE_METERS, require_non_negative};

/// Search around a point.
///
/// Coordinates are kept raw until the operation runs so that an out-of-range
/// value surfaces as a validation fault of that operation.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to the whole planet.
    pub radius_meters: Option<i64>,
    pub record_limit: Option<i64>,
    /// Only entries touched within this many minutes.
    pub within_minutes: Option<i64>,
    pub app_tag: Option<String>,
}

impl NearbySearch {
    pub fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters: None,
            record_limit: None,
            within_minutes: None,
            app_tag: None,
        }
    }

    /// No location filter at all.
    pub fn anywhere() -> Self {
        Self::around(0.0, 0.0)
    }

    pub fn within_meters(mut self, meters: i64) -> Self {
        self.radius_meters = Some(meters);
        self
    }

    pub fn limit(mut self, records: i64) -> Self {
        self.record_limit = Some(records);
        self
    }

    pub fn touched_within_minutes(mut self, minutes: i64) -> Self {
        self.within_minutes = Some(minutes);
        self
    }

    pub fn tagged(mut self, app_tag: impl Into<String>) -> Self {
        self.app_tag = Some(app_tag.into());
        self
    }

    /// Validates the filter and appends `SearchDistance`, the two coordinate
    /// keys, `RecordLimit` and `TimeFilter`. Returns the origin for distance
    /// computation.
    pub(crate) fn apply(
        &self,
        params: ParamBag,
        latitude_key: &str,
        longitude_key: &str,
    ) -> BuddyResult<(ParamBag, GeoPoint)> {
        let origin = GeoPoint::new(self.latitude, self.longitude)?;
        let radius = match self.radius_meters {
            Some(meters) => require_non_negative("searchDistanceInMeters", meters)?,
            None => UNBOUNDED_DISTANCE_METERS,
        };
        let limit = match self.record_limit {
            Some(limit) => require_non_negative("recordLimit", limit)?,
            None => DEFAULT_RECORD_LIMIT,
        };
        if let Some(minutes) = self.within_minutes {
            require_non_negative("timeFilter", minutes)?;
        }
        let params = params
            .int("SearchDistance", radius)
            .float(latitude_key, origin.latitude())
            .float(longitude_key, origin.longitude())
            .int("RecordLimit", limit)
            .optional_int("TimeFilter", self.within_minutes);
        Ok((params, origin))
    }
}

impl Default for NearbySearch {
    fn default() -> Self {
        Self::anywhere()
    }
}

/// Location attached to something the user creates. Unset means "no
/// location", sent as `0,0`.
pub(crate) fn location_params(
    params: ParamBag,
    location: Option<(f64, f64)>,
    latitude_key: &str,
    longitude_key: &str,
) -> BuddyResult<ParamBag> {
    let point = match location {
        Some((latitude, longitude)) => GeoPoint::new(latitude, longitude)?,
        None => GeoPoint::origin(),
    };
    Ok(params
        .float(latitude_key, point.latitude())
        .float(longitude_key, point.longitude()))
}

/// Lower time bound for "since" queries. Unset means everything.
pub(crate) fn since(params: ParamBag, key: &str, after: Option<NaiveDateTime>) -> ParamBag {
    params.date(key, after.unwrap_or(DateTime::UNIX_EPOCH.naive_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unbounded() {
        let (params, origin) = NearbySearch::anywhere()
            .apply(ParamBag::anonymous(), "Latitude", "Longitude")
            .unwrap();
        assert_eq!(origin, GeoPoint::origin());
        assert_eq!(params.get("SearchDistance"), Some("40075000"));
        assert_eq!(params.get("RecordLimit"), Some("10"));
        assert_eq!(params.get("TimeFilter"), Some("-1"));
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let err = NearbySearch::around(95.0, 0.0)
            .apply(ParamBag::anonymous(), "Latitude", "Longitude")
            .unwrap_err();
        assert_eq!(err.argument_name(), Some("latitude"));
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let err = NearbySearch::around(1.0, 1.0)
            .within_meters(-5)
            .apply(ParamBag::anonymous(), "Latitude", "Longitude")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_location_params_default_to_origin() {
        let params = location_params(ParamBag::anonymous(), None, "Lat", "Lng").unwrap();
        assert_eq!(params.get("Lat"), Some("0"));
        assert!(location_params(ParamBag::anonymous(), Some((0.0, 200.0)), "Lat", "Lng").is_err());
    }

    #[test]
    fn test_since_defaults_to_epoch() {
        let params = since(ParamBag::anonymous(), "FromDateTime", None);
        assert_eq!(params.get("FromDateTime"), Some("1970-01-01T00:00:00"));
    }
}
