//! Shared call context handed to every service.

use std::sync::Arc;

use buddy_core::{
    AuthenticatedSession, ClientConfig, Operation, ParamBag, Session, Transport,
};

/// Application-scope context: transport, session and config.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) session: Arc<Session>,
    pub(crate) config: Arc<ClientConfig>,
}

impl AppContext {
    pub(crate) fn params(&self) -> ParamBag {
        ParamBag::for_app(&self.session)
    }

    pub(crate) fn op(&self, method: &'static str, params: ParamBag) -> Operation {
        Operation::new(self.transport.clone(), method, params)
    }

    pub(crate) fn authenticated(&self, auth: AuthenticatedSession, user_id: i64) -> UserContext {
        UserContext {
            app: self.clone(),
            auth,
            user_id,
        }
    }
}

/// User-scope context: everything in [`AppContext`] plus the user token.
#[derive(Clone)]
pub(crate) struct UserContext {
    pub(crate) app: AppContext,
    pub(crate) auth: AuthenticatedSession,
    pub(crate) user_id: i64,
}

impl UserContext {
    pub(crate) fn params(&self) -> ParamBag {
        ParamBag::for_user(&self.auth)
    }

    pub(crate) fn op(&self, method: &'static str, params: ParamBag) -> Operation {
        self.app.op(method, params)
    }
}

/// Base parameters plus transport for services usable at either scope.
#[derive(Clone)]
pub(crate) struct Scope {
    transport: Arc<dyn Transport>,
    base: ParamBag,
}

impl Scope {
    pub(crate) fn params(&self) -> ParamBag {
        self.base.clone()
    }

    pub(crate) fn op(&self, method: &'static str, params: ParamBag) -> Operation {
        Operation::new(self.transport.clone(), method, params)
    }
}

impl From<&AppContext> for Scope {
    fn from(ctx: &AppContext) -> Self {
        Self {
            transport: ctx.transport.clone(),
            base: ctx.params(),
        }
    }
}

impl From<&UserContext> for Scope {
    fn from(ctx: &UserContext) -> Self {
        Self {
            transport: ctx.app.transport.clone(),
            base: ctx.params(),
        }
    }
}
