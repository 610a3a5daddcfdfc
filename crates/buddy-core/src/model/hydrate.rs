//! Entity hydration: typed reads from string wire records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};

use super::geo::{Distance, GeoPoint};
use crate::transport::WireRecord;

/// A wire record field could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationError {
    pub field: String,
    pub message: String,
}

impl HydrationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for HydrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for HydrationError {}

/// Builds an immutable entity from one wire record. Must not perform I/O.
pub trait Hydrate: Sized {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError>;
}

/// Entities that can carry a distance from a caller-supplied origin.
pub trait HydrateAt: Hydrate {
    fn position(&self) -> Option<GeoPoint>;

    fn with_distance(self, distance: Distance) -> Self;

    fn hydrate_at(record: &WireRecord, origin: GeoPoint) -> Result<Self, HydrationError> {
        let entity = Self::hydrate(record)?;
        Ok(match entity.position() {
            Some(position) => {
                let distance = Distance::between(origin, position);
                entity.with_distance(distance)
            }
            None => entity,
        })
    }
}

// Formats the service has been observed to use for timestamps.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a service timestamp into a naive UTC date-time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

impl WireRecord {
    /// A field that must be present. Empty strings are allowed.
    pub fn required(&self, key: &str) -> Result<String, HydrationError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| HydrationError::new(key, "missing from record"))
    }

    /// A field that may be absent; absent reads as an empty string.
    pub fn text_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn int(&self, key: &str) -> Result<i64, HydrationError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| HydrationError::new(key, format!("'{raw}' is not an integer")))
    }

    /// Absent or empty reads as `None`; anything else must parse.
    pub fn optional_int(&self, key: &str) -> Result<Option<i64>, HydrationError> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(_) => self.int(key).map(Some),
        }
    }

    pub fn float(&self, key: &str) -> Result<f64, HydrationError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| HydrationError::new(key, format!("'{raw}' is not a number")))
    }

    pub fn optional_float(&self, key: &str) -> Result<Option<f64>, HydrationError> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(_) => self.float(key).map(Some),
        }
    }

    /// Accepts `1`/`0` and `true`/`false` in any case.
    pub fn flag(&self, key: &str) -> Result<bool, HydrationError> {
        let raw = self.required(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(HydrationError::new(key, format!("'{raw}' is not a flag"))),
        }
    }

    /// Absent reads as `false`.
    pub fn optional_flag(&self, key: &str) -> Result<bool, HydrationError> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(false),
            Some(_) => self.flag(key),
        }
    }

    pub fn timestamp(&self, key: &str) -> Result<NaiveDateTime, HydrationError> {
        let raw = self.required(key)?;
        parse_timestamp(&raw)
            .ok_or_else(|| HydrationError::new(key, format!("'{raw}' is not a date")))
    }

    pub fn optional_timestamp(&self, key: &str) -> Result<Option<NaiveDateTime>, HydrationError> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(_) => self.timestamp(key).map(Some),
        }
    }

    /// Parses a closed-set value. Unknown strings fault instead of defaulting.
    pub fn enumerated<T: FromStr>(&self, key: &str) -> Result<T, HydrationError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| HydrationError::new(key, format!("'{raw}' is not a recognised value")))
    }

    /// A coordinate pair; both absent (or both empty) reads as `None`.
    pub fn position(&self, lat_key: &str, lng_key: &str) -> Result<Option<GeoPoint>, HydrationError> {
        match (self.optional_float(lat_key)?, self.optional_float(lng_key)?) {
            (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude)
                .map(Some)
                .map_err(|_| HydrationError::new(lat_key, "coordinate out of range")),
            (None, None) => Ok(None),
            _ => Err(HydrationError::new(lat_key, "incomplete coordinate pair")),
        }
    }

    /// A comma separated list of integers, empty entries ignored.
    pub fn int_list(&self, key: &str) -> Result<Vec<i64>, HydrationError> {
        self.text_or_empty(key)
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse()
                    .map_err(|_| HydrationError::new(key, format!("'{part}' is not an integer")))
            })
            .collect()
    }
}
