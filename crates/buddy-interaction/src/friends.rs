//! Friend lists and friend requests of the current user.

use chrono::NaiveDateTime;

use buddy_core::model::{FriendRequest, User};
use buddy_core::params::require_non_negative;
use buddy_core::{PendingCall, SentinelPolicy};

use crate::context::UserContext;
use crate::methods;
use crate::search::{NearbySearch, since};

#[derive(Clone)]
pub struct Friends {
    ctx: UserContext,
}

impl Friends {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn get_all(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<User>> {
        let params = since(self.ctx.params(), "FromDateTime", after);
        self.ctx
            .op(methods::FRIENDS_GET_ALL, params)
            .list(SentinelPolicy::STRICT)
    }

    pub fn remove(&self, friend_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let friend_id = require_non_negative("friendId", friend_id)?;
            let params = self.ctx.params().int("FriendProfileID", friend_id);
            Ok(self
                .ctx
                .op(methods::FRIENDS_REMOVE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Friends inside the search area.
    pub fn find_nearby(&self, search: &NearbySearch) -> PendingCall<Vec<User>> {
        PendingCall::prepare(|| {
            let (params, origin) = search.apply(self.ctx.params(), "Latitude", "Longitude")?;
            Ok(self
                .ctx
                .op(methods::FRIENDS_SEARCH, params)
                .list_at(SentinelPolicy::STRICT, origin))
        })
    }

    pub fn requests(&self) -> FriendRequests {
        FriendRequests {
            ctx: self.ctx.clone(),
        }
    }
}

/// Pending friend requests, in both directions.
#[derive(Clone)]
pub struct FriendRequests {
    ctx: UserContext,
}

impl FriendRequests {
    pub fn add(&self, user_id: i64, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let user_id = require_non_negative("userId", user_id)?;
            let params = self
                .ctx
                .params()
                .int("FriendProfileID", user_id)
                .optional_text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::FRIEND_REQUEST_ADD, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn accept(&self, user_id: i64, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let user_id = require_non_negative("userId", user_id)?;
            let params = self
                .ctx
                .params()
                .int("FriendProfileID", user_id)
                .optional_text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::FRIEND_REQUEST_ACCEPT, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn deny(&self, user_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let user_id = require_non_negative("userId", user_id)?;
            let params = self.ctx.params().int("FriendProfileID", user_id);
            Ok(self
                .ctx
                .op(methods::FRIEND_REQUEST_DENY, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Requests other users sent to the current user.
    pub fn received(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<FriendRequest>> {
        let params = since(self.ctx.params(), "FromDateTime", after);
        self.ctx
            .op(methods::FRIEND_REQUEST_RECEIVED, params)
            .list(SentinelPolicy::STRICT)
    }

    pub fn sent(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<FriendRequest>> {
        let params = since(self.ctx.params(), "FromDateTime", after);
        self.ctx
            .op(methods::FRIEND_REQUEST_SENT, params)
            .list(SentinelPolicy::STRICT)
    }
}
