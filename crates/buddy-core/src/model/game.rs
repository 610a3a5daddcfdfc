use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geo::{Distance, GeoPoint};
use super::hydrate::{Hydrate, HydrateAt, HydrationError};
use crate::transport::WireRecord;

/// A score posted to a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub user_id: i64,
    pub user_name: String,
    pub board_name: String,
    pub score: f64,
    pub rank: String,
    pub app_tag: String,
    pub location: Option<GeoPoint>,
    pub added_on: Option<NaiveDateTime>,
    pub distance: Option<Distance>,
}

impl Hydrate for GameScore {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            user_id: record.int("UserID")?,
            user_name: record.text_or_empty("UserName"),
            board_name: record.text_or_empty("ScoreBoardName"),
            score: record.float("Score")?,
            rank: record.text_or_empty("ScoreRank"),
            app_tag: record.text_or_empty("ApplicationTag"),
            location: record.position("ScoreLatitude", "ScoreLongitude")?,
            added_on: record.optional_timestamp("ScoreDate")?,
            distance: None,
        })
    }
}

impl HydrateAt for GameScore {
    fn position(&self) -> Option<GeoPoint> {
        self.location
    }

    fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// A user's player record for one game board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub user_id: i64,
    pub name: String,
    pub board_name: String,
    pub rank: String,
    pub app_tag: String,
    pub location: Option<GeoPoint>,
    pub created: Option<NaiveDateTime>,
    pub distance: Option<Distance>,
}

impl Hydrate for GamePlayer {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            user_id: record.int("UserID")?,
            name: record.required("PlayerName")?,
            board_name: record.text_or_empty("PlayerBoardName"),
            rank: record.text_or_empty("PlayerRank"),
            app_tag: record.text_or_empty("ApplicationTag"),
            location: record.position("PlayerLatitude", "PlayerLongitude")?,
            created: record.optional_timestamp("PlayerDate")?,
            distance: None,
        })
    }
}

impl HydrateAt for GamePlayer {
    fn position(&self) -> Option<GeoPoint> {
        self.location
    }

    fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// A saved piece of game state keyed per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateItem {
    pub key: String,
    pub value: String,
    pub app_tag: String,
    pub added_on: Option<NaiveDateTime>,
}

impl Hydrate for GameStateItem {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            key: record.required("StateKey")?,
            value: record.text_or_empty("StateValue"),
            app_tag: record.text_or_empty("AppTag"),
            added_on: record.optional_timestamp("StateDateTime")?,
        })
    }
}
