//! Request parameter building and argument validation.
//!
//! Every operation validates its arguments here before a [`ParamBag`] is
//! handed to the transport. Validation failures never reach the network.

use chrono::NaiveDateTime;

use crate::error::{BuddyError, BuddyResult};
use crate::session::{AuthenticatedSession, Session};

/// Search radius the service interprets as "anywhere" (Earth's circumference).
pub const UNBOUNDED_DISTANCE_METERS: i64 = 40_075_000;

/// Record limit used when the caller does not pick one.
pub const DEFAULT_RECORD_LIMIT: i64 = 10;

/// Wire value for an unset numeric filter.
pub const ANY: &str = "-1";

const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Ordered key/value form parameters for one remote call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ParamBag {
    entries: Vec<(String, String)>,
}

impl ParamBag {
    /// An empty bag without credentials (service-level probes like ping).
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A bag carrying the application credentials.
    pub fn for_app(session: &Session) -> Self {
        Self::anonymous()
            .text("BuddyApplicationName", session.app_name())
            .text("BuddyApplicationPassword", session.app_password())
    }

    /// A bag carrying the application credentials and the user token.
    pub fn for_user(session: &AuthenticatedSession) -> Self {
        Self::for_app(session.session()).text("UserToken", session.token().expose())
    }

    pub fn text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.push((key.to_string(), value.into()));
        self
    }

    /// Unset text is sent as an empty string, never omitted.
    pub fn optional_text(self, key: &str, value: Option<&str>) -> Self {
        self.text(key, value.unwrap_or_default())
    }

    pub fn int(self, key: &str, value: i64) -> Self {
        self.text(key, value.to_string())
    }

    /// Unset numbers are sent as `-1`.
    pub fn optional_int(self, key: &str, value: Option<i64>) -> Self {
        match value {
            Some(value) => self.int(key, value),
            None => self.text(key, ANY),
        }
    }

    /// Floats use `.` as decimal separator regardless of host locale.
    pub fn float(self, key: &str, value: f64) -> Self {
        self.text(key, value.to_string())
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        self.text(key, if value { "1" } else { "0" })
    }

    pub fn date(self, key: &str, value: NaiveDateTime) -> Self {
        self.text(key, value.format(WIRE_DATE_FORMAT).to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter names only, safe to log.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Values include credentials; only keys are printed.
impl std::fmt::Debug for ParamBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ParamBag").field(&self.keys()).finish()
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Rejects empty or whitespace-only required strings.
pub fn require_text<'a>(name: &str, value: &'a str) -> BuddyResult<&'a str> {
    if value.trim().is_empty() {
        return Err(BuddyError::invalid_argument(name, "can't be null or empty"));
    }
    Ok(value)
}

/// Rejects a missing required reference.
pub fn require_some<'a, T>(name: &str, value: Option<&'a T>) -> BuddyResult<&'a T> {
    value.ok_or_else(|| BuddyError::invalid_argument(name, "can't be null"))
}

pub fn require_latitude(value: f64) -> BuddyResult<f64> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(BuddyError::invalid_argument(
            "latitude",
            "must be between -90.0 and 90.0",
        ));
    }
    Ok(value)
}

pub fn require_longitude(value: f64) -> BuddyResult<f64> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(BuddyError::invalid_argument(
            "longitude",
            "must be between -180.0 and 180.0",
        ));
    }
    Ok(value)
}

/// Rejects NaN and infinities, which would otherwise reach the wire as text.
pub fn require_finite(name: &str, value: f64) -> BuddyResult<f64> {
    if !value.is_finite() {
        return Err(BuddyError::invalid_argument(name, "must be a finite number"));
    }
    Ok(value)
}

pub fn require_non_negative(name: &str, value: i64) -> BuddyResult<i64> {
    if value < 0 {
        return Err(BuddyError::invalid_argument(name, "can't be smaller than 0"));
    }
    Ok(value)
}

/// Rejects values outside the inclusive `[min, max]` range.
pub fn require_range(name: &str, value: i64, min: i64, max: i64) -> BuddyResult<i64> {
    if value < min || value > max {
        return Err(BuddyError::invalid_argument(
            name,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

/// Rejects an empty collection.
pub fn require_non_empty<'a, T>(name: &str, values: &'a [T]) -> BuddyResult<&'a [T]> {
    if values.is_empty() {
        return Err(BuddyError::invalid_argument(name, "can't be empty"));
    }
    Ok(values)
}
