use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geo::{Distance, GeoPoint};
use super::hydrate::{Hydrate, HydrateAt, HydrationError};
use crate::transport::WireRecord;

/// One key/value pair stored at application or user scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
    pub app_tag: String,
    pub location: Option<GeoPoint>,
    pub last_updated: Option<NaiveDateTime>,
    pub distance: Option<Distance>,
}

impl Hydrate for MetadataItem {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            key: record.required("MetaKey")?,
            value: record.text_or_empty("MetaValue"),
            app_tag: record.text_or_empty("MetaAppTag"),
            location: record.position("MetaLatitude", "MetaLongitude")?,
            last_updated: record.optional_timestamp("LastUpdateDate")?,
            distance: None,
        })
    }
}

impl HydrateAt for MetadataItem {
    fn position(&self) -> Option<GeoPoint> {
        self.location
    }

    fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// Numeric aggregate over metadata values sharing a key prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSum {
    pub key_prefix: String,
    pub key_count: i64,
    pub total: f64,
}

impl Hydrate for MetadataSum {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            key_prefix: record.text_or_empty("MetaKey"),
            key_count: record.int("KeyCount")?,
            total: record.float("TotalValue")?,
        })
    }
}
