//! Identity values (emails, phone numbers, external ids) attached to the
//! current user, and lookups across all users.

use buddy_core::model::{IdentityItem, IdentityItemSearchResult};
use buddy_core::params::{require_non_empty, require_text};
use buddy_core::{PendingCall, SentinelPolicy};

use crate::context::UserContext;
use crate::methods;

#[derive(Clone)]
pub struct Identity {
    ctx: UserContext,
}

impl Identity {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn add(&self, value: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let value = require_text("value", value)?;
            let params = self.ctx.params().text("IdentityValue", value);
            Ok(self
                .ctx
                .op(methods::IDENTITY_ADD, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn remove(&self, value: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let value = require_text("value", value)?;
            let params = self.ctx.params().text("IdentityValue", value);
            Ok(self
                .ctx
                .op(methods::IDENTITY_REMOVE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn get_all(&self) -> PendingCall<Vec<IdentityItem>> {
        self.ctx
            .op(methods::IDENTITY_GET_ALL, self.ctx.params())
            .list(SentinelPolicy::STRICT)
    }

    /// One result per value, telling whether any user holds it.
    pub fn check_for_values(&self, values: &[&str]) -> PendingCall<Vec<IdentityItemSearchResult>> {
        PendingCall::prepare(|| {
            let values = require_non_empty("values", values)?;
            for value in values {
                require_text("values", value)?;
            }
            let params = self.ctx.params().text("IdentityValue", values.join(";"));
            Ok(self
                .ctx
                .op(methods::IDENTITY_CHECK, params)
                .list(SentinelPolicy::STRICT))
        })
    }
}
