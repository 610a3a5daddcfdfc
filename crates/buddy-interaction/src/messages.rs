//! Direct messages and message groups.

use chrono::NaiveDateTime;

use buddy_core::model::{GroupMessage, Message, MessageGroup};
use buddy_core::params::{require_non_negative, require_text};
use buddy_core::{PendingCall, SentinelPolicy};

use crate::context::UserContext;
use crate::methods;
use crate::search::{location_params, since};

/// One-to-one messages of the current user.
#[derive(Clone)]
pub struct Messages {
    ctx: UserContext,
}

impl Messages {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn send(&self, to_user_id: i64, text: &str, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let to_user_id = require_non_negative("toUserId", to_user_id)?;
            let text = require_text("message", text)?;
            let params = self
                .ctx
                .params()
                .text("MessageString", text)
                .int("ToUserID", to_user_id)
                .optional_text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::MESSAGE_SEND, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn received(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<Message>> {
        let params = since(self.ctx.params(), "FromDateTime", after);
        self.ctx
            .op(methods::MESSAGES_RECEIVED, params)
            .list(SentinelPolicy::STRICT)
    }

    pub fn sent(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<Message>> {
        let params = since(self.ctx.params(), "FromDateTime", after);
        self.ctx
            .op(methods::MESSAGES_SENT, params)
            .list(SentinelPolicy::STRICT)
    }
}

/// Named groups the current user can create, join and post to.
#[derive(Clone)]
pub struct MessageGroups {
    ctx: UserContext,
}

impl MessageGroups {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    /// An open group can be joined by anyone; a closed one only by invitation.
    pub fn create(&self, name: &str, open: bool, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let name = require_text("name", name)?;
            let params = self
                .ctx
                .params()
                .text("GroupName", name)
                .flag("OpenGroupLevel", open)
                .optional_text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::GROUP_CREATE, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn exists(&self, name: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let name = require_text("name", name)?;
            let params = self.ctx.params().text("GroupName", name);
            Ok(self
                .ctx
                .op(methods::GROUP_EXISTS, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn get_all(&self) -> PendingCall<Vec<MessageGroup>> {
        self.ctx
            .op(methods::GROUP_GET_ALL, self.ctx.params())
            .list(SentinelPolicy::STRICT)
    }

    /// Groups the current user owns or belongs to.
    pub fn get_mine(&self) -> PendingCall<Vec<MessageGroup>> {
        self.ctx
            .op(methods::GROUP_GET_MINE, self.ctx.params())
            .list(SentinelPolicy::STRICT)
    }

    pub fn join(&self, group: &MessageGroup) -> PendingCall<bool> {
        self.membership(methods::GROUP_JOIN, group.id)
    }

    pub fn leave(&self, group: &MessageGroup) -> PendingCall<bool> {
        self.membership(methods::GROUP_LEAVE, group.id)
    }

    pub fn delete_group(&self, group: &MessageGroup) -> PendingCall<bool> {
        self.membership(methods::GROUP_DELETE, group.id)
    }

    fn membership(&self, method: &'static str, group_id: i64) -> PendingCall<bool> {
        let params = self.ctx.params().int("GroupChatID", group_id);
        self.ctx.op(method, params).boolean(SentinelPolicy::NEGATIVE_ONE)
    }

    pub fn add_user(&self, group: &MessageGroup, user_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let user_id = require_non_negative("userId", user_id)?;
            let params = self
                .ctx
                .params()
                .int("GroupChatID", group.id)
                .int("UserProfileIDToAdd", user_id);
            Ok(self
                .ctx
                .op(methods::GROUP_ADD_MEMBER, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn remove_user(&self, group: &MessageGroup, user_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let user_id = require_non_negative("userId", user_id)?;
            let params = self
                .ctx
                .params()
                .int("GroupChatID", group.id)
                .int("UserProfileIDToRemove", user_id);
            Ok(self
                .ctx
                .op(methods::GROUP_REMOVE_MEMBER, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn send_to_group(
        &self,
        group: &MessageGroup,
        text: &str,
        location: Option<(f64, f64)>,
        app_tag: Option<&str>,
    ) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let text = require_text("message", text)?;
            let params = self
                .ctx
                .params()
                .int("GroupChatID", group.id)
                .text("MessageContent", text);
            let params = location_params(params, location, "Latitude", "Longitude")?
                .optional_text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::GROUP_MESSAGE_SEND, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn group_messages(
        &self,
        group: &MessageGroup,
        after: Option<NaiveDateTime>,
    ) -> PendingCall<Vec<GroupMessage>> {
        let params = self.ctx.params().int("GroupChatID", group.id);
        let params = since(params, "FromDateTime", after);
        self.ctx
            .op(methods::GROUP_MESSAGES, params)
            .list(SentinelPolicy::STRICT)
    }
}
