//! Application-scope entry point and the login flows.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;

use buddy_core::adapter::{self, Triage};
use buddy_core::model::{ApplicationStatistics, UserGender, UserProfile, UserStatus};
use buddy_core::params::{require_range, require_text};
use buddy_core::transport::WireResult;
use buddy_core::{
    AuthenticatedSession, BuddyError, BuddyResult, ClientConfig, ParamBag, PendingCall,
    SentinelPolicy, Session, Transport, UserToken,
};

use crate::context::{AppContext, Scope};
use crate::devices::Devices;
use crate::game::GameBoards;
use crate::metadata::Metadata;
use crate::methods;
use crate::user::AuthenticatedUser;

const USER_NAME_ANSWERS: SentinelPolicy =
    SentinelPolicy::allowing(&["UserNameAlreadyInUse", "UserNameAvailble"]);
const EMAIL_ANSWERS: SentinelPolicy =
    SentinelPolicy::allowing(&["UserEmailTaken", "UserEmailAvailable"]);

/// Fields for a new account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub gender: UserGender,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub status: UserStatus,
    pub location_fuzzing: bool,
    pub celebrity_mode: bool,
    pub app_tag: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            gender: UserGender::Male,
            age: None,
            email: None,
            status: UserStatus::Any,
            location_fuzzing: false,
            celebrity_mode: false,
            app_tag: None,
        }
    }

    pub fn with_gender(mut self, gender: UserGender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }
}

/// Entry point of the SDK, scoped to one application.
///
/// Cloning is cheap; clones share the session, transport and the
/// device-registration flag.
#[derive(Clone)]
pub struct BuddyClient {
    ctx: AppContext,
    device_registration_failed: Arc<AtomicBool>,
}

impl BuddyClient {
    /// Builds a client from configuration. Fails if the application
    /// credentials are missing.
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> BuddyResult<Self> {
        let session = Session::from_config(&config)?;
        Ok(Self::with_session(session, config, transport))
    }

    pub fn with_session(session: Session, config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            ctx: AppContext {
                transport,
                session: Arc::new(session),
                config: Arc::new(config),
            },
            device_registration_failed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.ctx.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.ctx.config
    }

    /// True once a post-login device registration has failed. Login itself
    /// still succeeded in that case.
    pub fn device_registration_failed(&self) -> bool {
        self.device_registration_failed.load(Ordering::SeqCst)
    }

    // ============================================================================
    // Service probes
    // ============================================================================

    /// Returns the service's answer to a ping, usually `"Pong"`.
    pub fn ping(&self) -> PendingCall<Option<String>> {
        self.ctx
            .op(methods::SERVICE_PING, self.ctx.params())
            .text(SentinelPolicy::STRICT)
    }

    pub fn service_time(&self) -> PendingCall<Option<NaiveDateTime>> {
        self.ctx
            .op(methods::SERVICE_TIME, self.ctx.params())
            .timestamp(SentinelPolicy::STRICT)
    }

    pub fn service_version(&self) -> PendingCall<Option<String>> {
        self.ctx
            .op(methods::SERVICE_VERSION, self.ctx.params())
            .text(SentinelPolicy::STRICT)
    }

    pub fn statistics(&self) -> PendingCall<ApplicationStatistics> {
        self.ctx
            .op(methods::APPLICATION_STATS, self.ctx.params())
            .optional::<ApplicationStatistics>(SentinelPolicy::STRICT)
            .map(Option::unwrap_or_default)
    }

    pub fn user_count(&self) -> PendingCall<i64> {
        self.statistics().map(|stats| stats.total_users)
    }

    // ============================================================================
    // Account checks
    // ============================================================================

    /// True if `name` is already taken.
    pub fn check_user_name(&self, name: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let name = require_text("userName", name)?;
            let params = self.ctx.params().text("UserNameToVerify", name);
            Ok(self
                .ctx
                .op(methods::PROFILE_CHECK_USER_NAME, params)
                .adapt(|method, outcome| taken(method, outcome, USER_NAME_ANSWERS, "UserNameAlreadyInUse")))
        })
    }

    /// True if `email` is already registered.
    pub fn check_email(&self, email: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let email = require_text("email", email)?;
            let params = self.ctx.params().text("UserEmailToVerify", email);
            Ok(self
                .ctx
                .op(methods::PROFILE_CHECK_EMAIL, params)
                .adapt(|method, outcome| taken(method, outcome, EMAIL_ANSWERS, "UserEmailTaken")))
        })
    }

    // ============================================================================
    // Login flows
    // ============================================================================

    /// Creates an account and signs it in.
    pub fn create_user(&self, user: &NewUser) -> PendingCall<AuthenticatedUser> {
        PendingCall::prepare(|| {
            let name = require_text("name", &user.name)?;
            let password = require_text("password", &user.password)?;
            if let Some(age) = user.age {
                require_range("age", age, 0, 150)?;
            }
            let params = self
                .ctx
                .params()
                .text("NewUserName", name)
                .text("UserSuppliedPassword", password)
                .text("NewUserGender", user.gender.wire_value())
                .optional_int("UserAge", user.age)
                .optional_text("NewUserEmail", user.email.as_deref())
                .text("StatusID", user.status.wire_value())
                .flag("FuzzLocationEnabled", user.location_fuzzing)
                .flag("CelebModeEnabled", user.celebrity_mode)
                .optional_text("ApplicationTag", user.app_tag.as_deref());
            let token = self
                .ctx
                .op(methods::PROFILE_CREATE, params)
                .text(SentinelPolicy::STRICT);
            Ok(self.complete_login(token))
        })
    }

    pub fn login(&self, name: &str, password: &str) -> PendingCall<AuthenticatedUser> {
        PendingCall::prepare(|| {
            let name = require_text("username", name)?;
            let password = require_text("password", password)?;
            let params = self
                .ctx
                .params()
                .text("username", name)
                .text("UserSuppliedPassword", password);
            let token = self
                .ctx
                .op(methods::PROFILE_RECOVER, params)
                .text(SentinelPolicy::STRICT);
            Ok(self.complete_login(token))
        })
    }

    /// Resumes a session from a previously issued token.
    pub fn login_with_token(&self, token: &str) -> PendingCall<AuthenticatedUser> {
        PendingCall::prepare(|| {
            let token = UserToken::new(require_text("token", token)?)?;
            Ok(self.complete_login(PendingCall::ready(Some(token.expose().to_string()))))
        })
    }

    /// Signs in through a third-party identity provider.
    ///
    /// The provider access token is exchanged first, the exchanged token
    /// signs the user in, and then the profile is fetched. Each step waits
    /// for the previous one.
    pub fn social_login(
        &self,
        provider: &str,
        provider_user_id: &str,
        access_token: &str,
    ) -> PendingCall<AuthenticatedUser> {
        PendingCall::prepare(|| {
            let provider = require_text("providerName", provider)?.to_string();
            let provider_user_id = require_text("providerUserId", provider_user_id)?.to_string();
            let access_token = require_text("accessToken", access_token)?;

            let exchange = self.ctx.op(
                methods::PROFILE_EXCHANGE_SOCIAL_TOKEN,
                self.ctx
                    .params()
                    .text("ProviderName", &provider)
                    .text("ProviderAccessToken", access_token),
            );
            let ctx = self.ctx.clone();
            let token = exchange
                .text(SentinelPolicy::STRICT)
                .and_then(move |exchanged| {
                    let Some(exchanged) = exchanged else {
                        return PendingCall::rejected(BuddyError::transport(format!(
                            "{} returned no token",
                            methods::PROFILE_EXCHANGE_SOCIAL_TOKEN
                        )));
                    };
                    let params = ctx
                        .params()
                        .text("ProviderName", provider)
                        .text("ProviderUserID", provider_user_id)
                        .text("AccessToken", exchanged);
                    ctx.op(methods::PROFILE_SOCIAL_LOGIN, params)
                        .first_field(SentinelPolicy::STRICT, "UserToken")
                });
            Ok(self.complete_login(token))
        })
    }

    /// Second half of every login: turns a token into a profile. The token
    /// is only kept if the profile fetch succeeds.
    fn complete_login(&self, token: PendingCall<Option<String>>) -> PendingCall<AuthenticatedUser> {
        let ctx = self.ctx.clone();
        let failed = self.device_registration_failed.clone();
        token
            .and_then(move |token| {
                let token = match token {
                    Some(token) => token,
                    None => return PendingCall::rejected(BuddyError::transport("login returned no token")),
                };
                let auth = match UserToken::new(token) {
                    Ok(token) => AuthenticatedSession::new(ctx.session.clone(), token),
                    Err(err) => return PendingCall::rejected(err),
                };
                fetch_profile(ctx, auth)
            })
            .and_then(move |user| record_device(user, failed))
    }

    // ============================================================================
    // Sub-services
    // ============================================================================

    /// Application-wide metadata.
    pub fn metadata(&self) -> Metadata {
        Metadata::new(Scope::from(&self.ctx), &methods::APP_METADATA)
    }

    pub fn game_boards(&self) -> GameBoards {
        GameBoards::new(Scope::from(&self.ctx))
    }

    pub fn devices(&self) -> Devices {
        Devices::new(Scope::from(&self.ctx), self.ctx.session.clone())
    }
}

fn taken(
    method: &'static str,
    outcome: WireResult,
    answers: SentinelPolicy,
    taken_code: &str,
) -> BuddyResult<bool> {
    match adapter::triage(method, outcome, answers)? {
        Triage::Benign(code) => Ok(code.as_str() == taken_code),
        Triage::Payload(_) => Err(BuddyError::transport(format!(
            "{method} returned no availability answer"
        ))),
    }
}

pub(crate) fn fetch_profile(ctx: AppContext, auth: AuthenticatedSession) -> PendingCall<AuthenticatedUser> {
    let params = ParamBag::for_user(&auth);
    ctx.op(methods::PROFILE_FROM_TOKEN, params)
        .optional::<UserProfile>(SentinelPolicy::STRICT)
        .and_then(move |profile| match profile {
            Some(profile) => {
                let user_ctx = ctx.authenticated(auth, profile.user.id);
                PendingCall::ready(AuthenticatedUser::new(profile, user_ctx))
            }
            None => PendingCall::rejected(BuddyError::transport(format!(
                "{} returned no profile",
                methods::PROFILE_FROM_TOKEN
            ))),
        })
}

// Best effort: a failure is logged and flagged but never fails the login.
fn record_device(user: AuthenticatedUser, failed: Arc<AtomicBool>) -> PendingCall<AuthenticatedUser> {
    if !user.context().app.config.record_device_on_login {
        return PendingCall::ready(user);
    }
    let registration = user.devices().record_information(None, None);
    PendingCall::new(async move {
        if let Err(err) = registration.await {
            tracing::warn!(user_id = user.id(), error = %err, "device registration after login failed");
            failed.store(true, Ordering::SeqCst);
        }
        Ok(user)
    })
}
