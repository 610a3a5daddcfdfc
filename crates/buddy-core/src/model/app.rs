//! Application-wide entities: usage statistics and push registrations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::hydrate::{Hydrate, HydrationError};
use crate::transport::WireRecord;

/// Usage counters for the whole application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatistics {
    pub total_users: i64,
    pub total_photos: i64,
    pub total_user_check_ins: i64,
    pub total_user_metadata: i64,
    pub total_app_metadata: i64,
    pub total_friends: i64,
    pub total_albums: i64,
    pub total_crashes: i64,
    pub total_messages: i64,
    pub total_push_messages: i64,
    pub total_game_scores: i64,
    pub total_device_information: i64,
}

impl Hydrate for ApplicationStatistics {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        let count = |key: &str| record.optional_int(key).map(Option::unwrap_or_default);
        Ok(Self {
            total_users: count("TotalUsers")?,
            total_photos: count("TotalPhotos")?,
            total_user_check_ins: count("TotalUserCheckins")?,
            total_user_metadata: count("TotalUserMetadata")?,
            total_app_metadata: count("TotalAppMetadata")?,
            total_friends: count("TotalFriends")?,
            total_albums: count("TotalAlbums")?,
            total_crashes: count("TotalCrashes")?,
            total_messages: count("TotalMessages")?,
            total_push_messages: count("TotalPushMessages")?,
            total_game_scores: count("TotalGamerScores")?,
            total_device_information: count("TotalDeviceInformation")?,
        })
    }
}

/// A device registered for push notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredDevice {
    pub user_id: i64,
    pub device_address: String,
    pub group_name: String,
    pub registered: Option<NaiveDateTime>,
}

impl Hydrate for RegisteredDevice {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            user_id: record.int("UserID")?,
            device_address: record.required("DeviceAddress")?,
            group_name: record.text_or_empty("GroupName"),
            registered: record.optional_timestamp("LastUpdateDate")?,
        })
    }
}

/// A named push group and how many devices it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGroup {
    pub name: String,
    pub device_count: i64,
}

impl Hydrate for NotificationGroup {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            name: record.required("GroupName")?,
            device_count: record.optional_int("DeviceCount")?.unwrap_or_default(),
        })
    }
}
