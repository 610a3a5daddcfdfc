//! Leaderboards, player records and per-user game state.

use buddy_core::model::{GamePlayer, GameScore, GameStateItem};
use buddy_core::params::{
    ANY, DEFAULT_RECORD_LIMIT, require_finite, require_non_negative, require_text,
};
use buddy_core::{PendingCall, SentinelPolicy};

use crate::context::{Scope, UserContext};
use crate::methods;
use crate::search::{NearbySearch, location_params};

// ============================================================================
// Boards (application scope)
// ============================================================================

/// Filters for [`GameBoards::find_scores`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSearch {
    pub area: NearbySearch,
    pub board: Option<String>,
    /// Only scores by this user.
    pub user_id: Option<i64>,
    pub minimum_score: Option<f64>,
}

/// Read access to every leaderboard of the application.
#[derive(Clone)]
pub struct GameBoards {
    scope: Scope,
}

impl GameBoards {
    pub(crate) fn new(scope: Scope) -> Self {
        Self { scope }
    }

    pub fn high_scores(&self, board: &str, limit: Option<i64>) -> PendingCall<Vec<GameScore>> {
        self.board(methods::SCORE_BOARD_HIGH, board, limit)
    }

    pub fn low_scores(&self, board: &str, limit: Option<i64>) -> PendingCall<Vec<GameScore>> {
        self.board(methods::SCORE_BOARD_LOW, board, limit)
    }

    fn board(
        &self,
        method: &'static str,
        board: &str,
        limit: Option<i64>,
    ) -> PendingCall<Vec<GameScore>> {
        PendingCall::prepare(|| {
            let board = require_text("boardName", board)?;
            let limit = match limit {
                Some(limit) => require_non_negative("recordLimit", limit)?,
                None => DEFAULT_RECORD_LIMIT,
            };
            let params = self
                .scope
                .params()
                .text("ScoreBoardName", board)
                .int("RecordLimit", limit);
            Ok(self.scope.op(method, params).list(SentinelPolicy::STRICT))
        })
    }

    pub fn find_scores(&self, search: &ScoreSearch) -> PendingCall<Vec<GameScore>> {
        PendingCall::prepare(|| {
            let user_id = search
                .user_id
                .map(|id| require_non_negative("userId", id))
                .transpose()?;
            let minimum_score = search
                .minimum_score
                .map(|score| require_finite("minimumScore", score))
                .transpose()?;
            let (params, origin) = search.area.apply(self.scope.params(), "Latitude", "Longitude")?;
            let params = params
                .optional_int("UserID", user_id)
                .optional_text("SearchBoard", search.board.as_deref())
                .text(
                    "MinimumScore",
                    minimum_score
                        .map(|score| score.to_string())
                        .unwrap_or_else(|| ANY.to_string()),
                )
                .optional_text("AppTag", search.area.app_tag.as_deref());
            Ok(self
                .scope
                .op(methods::SCORE_SEARCH, params)
                .list_at(SentinelPolicy::STRICT, origin))
        })
    }
}

// ============================================================================
// Scores (user scope)
// ============================================================================

/// A score to post.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewScore {
    pub board: String,
    pub score: f64,
    pub rank: Option<String>,
    pub location: Option<(f64, f64)>,
    pub app_tag: Option<String>,
    /// Replace the user's previous score on this board instead of adding one.
    pub one_per_player: bool,
}

impl NewScore {
    pub fn new(board: impl Into<String>, score: f64) -> Self {
        Self {
            board: board.into(),
            score,
            ..Default::default()
        }
    }
}

/// The current user's scores.
#[derive(Clone)]
pub struct GameScores {
    ctx: UserContext,
}

impl GameScores {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn add(&self, score: &NewScore) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let board = require_text("boardName", &score.board)?;
            let value = require_finite("score", score.score)?;
            let params = location_params(
                self.ctx.params(),
                score.location,
                "ScoreLatitude",
                "ScoreLongitude",
            )?
            .optional_text("ScoreRank", score.rank.as_deref())
            .float("ScoreValue", value)
            .text("ScoreBoardName", board)
            .optional_text("ApplicationTag", score.app_tag.as_deref())
            .flag("OneScorePerPlayerBit", score.one_per_player);
            Ok(self
                .ctx
                .op(methods::SCORE_ADD, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn get_all(&self, limit: Option<i64>) -> PendingCall<Vec<GameScore>> {
        PendingCall::prepare(|| {
            let limit = match limit {
                Some(limit) => require_non_negative("recordLimit", limit)?,
                None => DEFAULT_RECORD_LIMIT,
            };
            let params = self
                .ctx
                .params()
                .int("UserID", self.ctx.user_id)
                .int("RecordLimit", limit);
            Ok(self
                .ctx
                .op(methods::SCORES_FOR_USER, params)
                .list(SentinelPolicy::STRICT))
        })
    }

    pub fn delete_all(&self) -> PendingCall<bool> {
        let params = self.ctx.params().int("UserID", self.ctx.user_id);
        self.ctx
            .op(methods::SCORES_DELETE_ALL, params)
            .boolean(SentinelPolicy::NEGATIVE_ONE)
    }
}

// ============================================================================
// Players
// ============================================================================

/// Fields of the current user's player record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerInfo {
    pub name: String,
    pub board: Option<String>,
    pub rank: Option<String>,
    pub location: Option<(f64, f64)>,
    pub app_tag: Option<String>,
}

/// Filters for [`GamePlayers::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSearch {
    pub area: NearbySearch,
    pub board: Option<String>,
    pub rank: Option<String>,
}

#[derive(Clone)]
pub struct GamePlayers {
    ctx: UserContext,
}

impl GamePlayers {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn add(&self, player: &PlayerInfo) -> PendingCall<bool> {
        self.write(methods::PLAYER_ADD, player)
    }

    /// `false` if the user has no player record yet.
    pub fn update(&self, player: &PlayerInfo) -> PendingCall<bool> {
        self.write(methods::PLAYER_UPDATE, player)
    }

    fn write(&self, method: &'static str, player: &PlayerInfo) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let name = require_text("name", &player.name)?;
            let params = self.ctx.params().text("PlayerName", name);
            let params = location_params(
                params,
                player.location,
                "PlayerLatitude",
                "PlayerLongitude",
            )?
            .optional_text("PlayerRank", player.rank.as_deref())
            .optional_text("PlayerBoardName", player.board.as_deref())
            .optional_text("ApplicationTag", player.app_tag.as_deref());
            Ok(self
                .ctx
                .op(method, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn delete(&self) -> PendingCall<bool> {
        self.ctx
            .op(methods::PLAYER_DELETE, self.ctx.params())
            .boolean(SentinelPolicy::NEGATIVE_ONE)
    }

    /// The current user's player record, if any.
    pub fn info(&self) -> PendingCall<Option<GamePlayer>> {
        self.ctx
            .op(methods::PLAYER_INFO, self.ctx.params())
            .optional(SentinelPolicy::STRICT)
    }

    pub fn find(&self, search: &PlayerSearch) -> PendingCall<Vec<GamePlayer>> {
        PendingCall::prepare(|| {
            let (params, origin) = search.area.apply(self.ctx.params(), "Latitude", "Longitude")?;
            let params = params
                .optional_text("SearchBoard", search.board.as_deref())
                .optional_text("PlayerRank", search.rank.as_deref())
                .optional_text("ApplicationTag", search.area.app_tag.as_deref());
            Ok(self
                .ctx
                .op(methods::PLAYER_SEARCH, params)
                .list_at(SentinelPolicy::STRICT, origin))
        })
    }
}

// ============================================================================
// State
// ============================================================================

/// Arbitrary key/value game state owned by the current user.
#[derive(Clone)]
pub struct GameState {
    ctx: UserContext,
}

impl GameState {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn add(&self, key: &str, value: &str, app_tag: Option<&str>) -> PendingCall<bool> {
        self.write(methods::STATE_ADD, key, value, app_tag)
    }

    pub fn update(&self, key: &str, value: &str, app_tag: Option<&str>) -> PendingCall<bool> {
        self.write(methods::STATE_UPDATE, key, value, app_tag)
    }

    fn write(
        &self,
        method: &'static str,
        key: &str,
        value: &str,
        app_tag: Option<&str>,
    ) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let key = require_text("key", key)?;
            let params = self
                .ctx
                .params()
                .int("ExternalUserID", self.ctx.user_id)
                .text("StateKey", key)
                .text("StateValue", value)
                .optional_text("StateAppTag", app_tag);
            Ok(self
                .ctx
                .op(method, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn get(&self, key: &str) -> PendingCall<Option<GameStateItem>> {
        PendingCall::prepare(|| {
            let key = require_text("key", key)?;
            let params = self
                .ctx
                .params()
                .int("ExternalUserID", self.ctx.user_id)
                .text("StateKey", key);
            Ok(self
                .ctx
                .op(methods::STATE_GET, params)
                .optional(SentinelPolicy::STRICT))
        })
    }

    pub fn remove(&self, key: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let key = require_text("key", key)?;
            let params = self
                .ctx
                .params()
                .int("ExternalUserID", self.ctx.user_id)
                .text("StateKey", key);
            Ok(self
                .ctx
                .op(methods::STATE_REMOVE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn get_all(&self) -> PendingCall<Vec<GameStateItem>> {
        let params = self.ctx.params().int("ExternalUserID", self.ctx.user_id);
        self.ctx
            .op(methods::STATE_GET_ALL, params)
            .list(SentinelPolicy::STRICT)
    }
}
