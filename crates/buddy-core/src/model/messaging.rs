use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::hydrate::{Hydrate, HydrationError};
use crate::transport::WireRecord;

/// A direct message between two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub text: String,
    pub date_sent: NaiveDateTime,
}

impl Hydrate for Message {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("MessageID")?,
            from_user_id: record.int("FromUserID")?,
            to_user_id: record.int("ToUserID")?,
            text: record.text_or_empty("MessageString"),
            date_sent: record.timestamp("DateSent")?,
        })
    }
}

/// A named group users can join and broadcast to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageGroup {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub app_tag: String,
    pub created: Option<NaiveDateTime>,
    pub member_ids: Vec<i64>,
}

impl Hydrate for MessageGroup {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("ChatGroupID")?,
            name: record.required("ChatGroupName")?,
            owner_id: record.int("OwnerUserID")?,
            app_tag: record.text_or_empty("ApplicationTag"),
            created: record.optional_timestamp("CreatedDateTime")?,
            member_ids: record.int_list("MemberUserIDList")?,
        })
    }
}

impl MessageGroup {
    pub fn has_member(&self, user_id: i64) -> bool {
        self.owner_id == user_id || self.member_ids.contains(&user_id)
    }
}

/// A message posted to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMessage {
    pub group_id: i64,
    pub from_user_id: i64,
    pub text: String,
    pub location: Option<GeoPoint>,
    pub app_tag: String,
    pub date_sent: NaiveDateTime,
}

impl Hydrate for GroupMessage {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            group_id: record.int("ChatGroupID")?,
            from_user_id: record.int("FromUserID")?,
            text: record.text_or_empty("MessageText"),
            location: record.position("Latitude", "Longitude")?,
            app_tag: record.text_or_empty("ApplicationTag"),
            date_sent: record.timestamp("SentDateTime")?,
        })
    }
}

/// A pending friend request, sent or received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub user_id: i64,
    pub user_name: String,
    pub app_tag: String,
    pub requested_on: Option<NaiveDateTime>,
}

impl Hydrate for FriendRequest {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            user_id: record.int("FriendID")?,
            user_name: record.text_or_empty("UserName"),
            app_tag: record.text_or_empty("ApplicationTag"),
            requested_on: record.optional_timestamp("RequestDate")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_members() {
        let record = WireRecord::new()
            .with("ChatGroupID", "9")
            .with("ChatGroupName", "climbers")
            .with("OwnerUserID", "1")
            .with("MemberUserIDList", "2,3");
        let group = MessageGroup::hydrate(&record).unwrap();
        assert_eq!(group.member_ids, vec![2, 3]);
        assert!(group.has_member(1));
        assert!(group.has_member(3));
        assert!(!group.has_member(4));
    }

    #[test]
    fn test_message_requires_date() {
        let record = WireRecord::new()
            .with("MessageID", "1")
            .with("FromUserID", "2")
            .with("ToUserID", "3")
            .with("MessageString", "hi");
        assert_eq!(Message::hydrate(&record).unwrap_err().field, "DateSent");
    }
}
