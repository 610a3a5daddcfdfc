//! Application and user credentials.
//!
//! A [`Session`] is created once from the application credentials and shared
//! read-only by every in-flight call. Authenticating yields an
//! [`AuthenticatedSession`] that adds the user token on top of the same
//! `Arc<Session>`.

use std::fmt;
use std::sync::Arc;

use crate::config::{ClientConfig, DeviceInfo};
use crate::error::{BuddyError, BuddyResult};

/// Application-level credentials plus the injected device description.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    app_name: String,
    app_password: String,
    app_version: Option<String>,
    device: DeviceInfo,
}

impl Session {
    /// Creates a session, rejecting empty credentials.
    pub fn new(app_name: impl Into<String>, app_password: impl Into<String>) -> BuddyResult<Self> {
        let app_name = app_name.into();
        let app_password = app_password.into();
        if app_name.trim().is_empty() {
            return Err(BuddyError::invalid_argument("app_name", "can't be null or empty"));
        }
        if app_password.trim().is_empty() {
            return Err(BuddyError::invalid_argument(
                "app_password",
                "can't be null or empty",
            ));
        }
        Ok(Self {
            app_name,
            app_password,
            app_version: None,
            device: DeviceInfo::default(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> BuddyResult<Self> {
        let mut session = Self::new(&config.app_name, &config.app_password)?;
        session.app_version = config.app_version.clone();
        session.device = config.device.clone();
        Ok(session)
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = device;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn app_password(&self) -> &str {
        &self.app_password
    }

    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }

    /// Version string sent with device reports, `"1.0"` when unset.
    pub fn app_version_or_default(&self) -> &str {
        self.app_version.as_deref().unwrap_or("1.0")
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("app_name", &self.app_name)
            .field("app_password", &"<redacted>")
            .field("app_version", &self.app_version)
            .finish()
    }
}

/// Opaque per-user secret issued by login or account creation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserToken(String);

impl UserToken {
    pub fn new(token: impl Into<String>) -> BuddyResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(BuddyError::invalid_argument("token", "can't be null or empty"));
        }
        Ok(Self(token))
    }

    /// Returns the raw token for request building.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserToken(<redacted>)")
    }
}

/// A session that has completed authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    session: Arc<Session>,
    token: UserToken,
}

impl AuthenticatedSession {
    pub fn new(session: Arc<Session>, token: UserToken) -> Self {
        Self { session, token }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn shared_session(&self) -> Arc<Session> {
        self.session.clone()
    }

    pub fn token(&self) -> &UserToken {
        &self.token
    }

    /// Drops the user credential, keeping the application session.
    pub fn into_public(self) -> Arc<Session> {
        self.session
    }
}
