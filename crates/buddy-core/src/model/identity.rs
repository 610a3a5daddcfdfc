use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::hydrate::{Hydrate, HydrationError};
use crate::transport::WireRecord;

/// An identity value (email, phone number, external id) attached to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityItem {
    pub value: String,
    pub created: Option<NaiveDateTime>,
}

impl Hydrate for IdentityItem {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            value: record.required("IdentityValue")?,
            created: record.optional_timestamp("CreatedDateTime")?,
        })
    }
}

/// Result of looking up one identity value across users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityItemSearchResult {
    pub value: String,
    pub found: bool,
    pub belongs_to_user_id: Option<i64>,
}

impl Hydrate for IdentityItemSearchResult {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        let belongs_to_user_id = record.optional_int("UserProfileID")?;
        Ok(Self {
            value: record.required("IdentityValue")?,
            found: record.optional_flag("Found")?,
            belongs_to_user_id: belongs_to_user_id.filter(|id| *id > 0),
        })
    }
}
