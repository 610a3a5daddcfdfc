//! User profile entities.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use super::geo::{Distance, GeoPoint};
use super::hydrate::{Hydrate, HydrateAt, HydrationError};
use crate::transport::WireRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum UserGender {
    Male,
    Female,
}

impl UserGender {
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Relationship status as stored by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
pub enum UserStatus {
    #[strum(serialize = "1", serialize = "Single")]
    Single,
    #[strum(serialize = "2", serialize = "Dating")]
    Dating,
    #[strum(serialize = "3", serialize = "Engaged")]
    Engaged,
    #[strum(serialize = "4", serialize = "Married")]
    Married,
    #[strum(serialize = "5", serialize = "Divorced")]
    Divorced,
    #[strum(serialize = "6", serialize = "Widowed")]
    Widowed,
    #[strum(serialize = "7", serialize = "OnBreak")]
    OnBreak,
    #[strum(serialize = "-1", serialize = "Any")]
    Any,
}

impl UserStatus {
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Single => "1",
            Self::Dating => "2",
            Self::Engaged => "3",
            Self::Married => "4",
            Self::Divorced => "5",
            Self::Widowed => "6",
            Self::OnBreak => "7",
            Self::Any => "-1",
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub gender: UserGender,
    pub age: i64,
    pub status: UserStatus,
    pub application_tag: String,
    pub location: Option<GeoPoint>,
    pub profile_picture_url: String,
    pub last_login: Option<NaiveDateTime>,
    pub created: Option<NaiveDateTime>,
    pub distance: Option<Distance>,
}

impl Hydrate for User {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("UserID")?,
            name: record.required("UserName")?,
            gender: record.enumerated("UserGender")?,
            age: record.optional_int("UserAge")?.unwrap_or_default(),
            status: record.enumerated("StatusID")?,
            application_tag: record.text_or_empty("UserApplicationTag"),
            location: record.position("UserLatitude", "UserLongitude")?,
            profile_picture_url: record.text_or_empty("ProfilePictureUrl"),
            last_login: record.optional_timestamp("LastLoginDate")?,
            created: record.optional_timestamp("CreatedDate")?,
            distance: None,
        })
    }
}

impl HydrateAt for User {
    fn position(&self) -> Option<GeoPoint> {
        self.location
    }

    fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// The signed-in user's own profile, including private fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
    pub email: String,
    pub celebrity_mode: bool,
    pub location_fuzzing: bool,
}

impl Hydrate for UserProfile {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            user: User::hydrate(record)?,
            email: record.text_or_empty("UserEmail"),
            celebrity_mode: record.optional_flag("CelebMode")?,
            location_fuzzing: record.optional_flag("LocationFuzzing")?,
        })
    }
}

/// A past check-in of the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInLocation {
    pub location: GeoPoint,
    pub check_in_date: NaiveDateTime,
    pub place_name: String,
    pub comment: String,
}

impl Hydrate for CheckInLocation {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            location: record
                .position("Latitude", "Longitude")?
                .ok_or_else(|| HydrationError::new("Latitude", "missing from record"))?,
            check_in_date: record.timestamp("CheckinDate")?,
            place_name: record.text_or_empty("PlaceName"),
            comment: record.text_or_empty("CheckinComment"),
        })
    }
}

#[cfg(test)]
pub(crate) fn user_record(id: i64, name: &str) -> WireRecord {
    WireRecord::new()
        .with("UserID", id.to_string())
        .with("UserName", name)
        .with("UserGender", "Female")
        .with("UserAge", "29")
        .with("StatusID", "2")
        .with("UserLatitude", "47.6062")
        .with("UserLongitude", "-122.3321")
        .with("LastLoginDate", "1/2/2013 10:00:00 AM")
        .with("CreatedDate", "2012-06-01T08:30:00")
}
