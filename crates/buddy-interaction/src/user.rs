//! The signed-in user and the operations on their own account.

use std::sync::Arc;

use chrono::NaiveDateTime;

use buddy_core::model::{CheckInLocation, Picture, User, UserGender, UserProfile, UserStatus};
use buddy_core::params::{require_non_negative, require_range, require_text};
use buddy_core::{
    AuthenticatedSession, BuddyError, NotificationPlatform, PendingCall, SentinelPolicy, Upload, UserToken,
};

use crate::client::fetch_profile;
use crate::commerce::Commerce;
use crate::context::{Scope, UserContext};
use crate::devices::Devices;
use crate::files::{Blobs, Videos};
use crate::friends::Friends;
use crate::game::{GamePlayers, GameScores, GameState};
use crate::identity::Identity;
use crate::messages::{MessageGroups, Messages};
use crate::metadata::Metadata;
use crate::methods;
use crate::notifications::{Notifications, PushChannel};
use crate::pictures::{PhotoAlbums, VirtualAlbums};
use crate::search::{NearbySearch, location_params, since};

/// Changes to the current profile. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub gender: Option<UserGender>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub location_fuzzing: Option<bool>,
    pub celebrity_mode: Option<bool>,
    pub app_tag: Option<String>,
}

/// Filters for [`AuthenticatedUser::find_users`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSearch {
    pub area: NearbySearch,
    pub gender: Option<UserGender>,
    /// Inclusive age bounds.
    pub ages: Option<(i64, i64)>,
    pub status: Option<UserStatus>,
}

impl UserSearch {
    pub fn near(area: NearbySearch) -> Self {
        Self {
            area,
            ..Default::default()
        }
    }
}

/// A user who has completed login.
///
/// Holds a snapshot of the profile taken at login. [`refresh`](Self::refresh)
/// returns a new snapshot; this value never changes.
#[derive(Clone)]
pub struct AuthenticatedUser {
    profile: UserProfile,
    ctx: UserContext,
}

impl std::fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("profile", &self.profile)
            .field("token", self.ctx.auth.token())
            .finish()
    }
}

impl AuthenticatedUser {
    pub(crate) fn new(profile: UserProfile, ctx: UserContext) -> Self {
        Self { profile, ctx }
    }

    pub(crate) fn context(&self) -> &UserContext {
        &self.ctx
    }

    pub fn id(&self) -> i64 {
        self.profile.user.id
    }

    pub fn name(&self) -> &str {
        &self.profile.user.name
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn token(&self) -> &UserToken {
        self.ctx.auth.token()
    }

    pub fn session(&self) -> &AuthenticatedSession {
        &self.ctx.auth
    }

    /// The public view other users see.
    pub fn to_public(&self) -> User {
        self.profile.user.clone()
    }

    /// Fetches a fresh profile snapshot for the same token.
    pub fn refresh(&self) -> PendingCall<AuthenticatedUser> {
        fetch_profile(self.ctx.app.clone(), self.ctx.auth.clone())
    }

    // ============================================================================
    // Profile
    // ============================================================================

    pub fn update_profile(&self, update: &ProfileUpdate) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let current = &self.profile;
            let name = match &update.name {
                Some(name) => require_text("name", name)?,
                None => current.user.name.as_str(),
            };
            if let Some(password) = &update.password {
                require_text("password", password)?;
            }
            if let Some(age) = update.age {
                require_range("age", age, 0, 150)?;
            }
            let params = self
                .ctx
                .params()
                .text("UserName", name)
                .optional_text("UserSuppliedPassword", update.password.as_deref())
                .text(
                    "UserGender",
                    update.gender.unwrap_or(current.user.gender).wire_value(),
                )
                .int("UserAge", update.age.unwrap_or(current.user.age))
                .text("UserEmail", update.email.as_deref().unwrap_or(&current.email))
                .text(
                    "StatusID",
                    update.status.unwrap_or(current.user.status).wire_value(),
                )
                .flag(
                    "FuzzLocationEnabled",
                    update.location_fuzzing.unwrap_or(current.location_fuzzing),
                )
                .flag(
                    "CelebModeEnabled",
                    update.celebrity_mode.unwrap_or(current.celebrity_mode),
                )
                .text(
                    "ApplicationTag",
                    update
                        .app_tag
                        .as_deref()
                        .unwrap_or(&current.user.application_tag),
                );
            Ok(self
                .ctx
                .op(methods::PROFILE_UPDATE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Permanently deletes this account. The token is useless afterwards.
    pub fn delete_account(&self) -> PendingCall<bool> {
        let params = self.ctx.params().int("UserProfileID", self.id());
        self.ctx
            .op(methods::PROFILE_DELETE, params)
            .boolean(SentinelPolicy::NEGATIVE_ONE)
    }

    pub fn check_in(
        &self,
        latitude: f64,
        longitude: f64,
        comment: Option<&str>,
        app_tag: Option<&str>,
    ) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let params = location_params(
                self.ctx.params(),
                Some((latitude, longitude)),
                "Latitude",
                "Longitude",
            )?
            .optional_text("CheckInComment", comment)
            .optional_text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::LOCATION_CHECK_IN, params)
                .boolean(SentinelPolicy::STRICT))
        })
    }

    pub fn check_ins(&self, after: Option<NaiveDateTime>) -> PendingCall<Vec<CheckInLocation>> {
        let params = since(self.ctx.params(), "AfterDate", after);
        self.ctx
            .op(methods::LOCATION_CHECK_INS, params)
            .list(SentinelPolicy::STRICT)
    }

    // ============================================================================
    // Other users
    // ============================================================================

    /// Users near a point. Each result carries its distance from the search
    /// origin.
    pub fn find_users(&self, search: &UserSearch) -> PendingCall<Vec<User>> {
        PendingCall::prepare(|| {
            let (params, origin) = search.area.apply(self.ctx.params(), "Latitude", "Longitude")?;
            let (age_start, age_stop) = match search.ages {
                Some((start, stop)) => {
                    let start = require_non_negative("ageStart", start)?;
                    (start, require_range("ageStop", stop, start, 150)?)
                }
                None => (0, 150),
            };
            let params = params
                .optional_text("Gender", search.gender.map(UserGender::wire_value))
                .int("AgeStart", age_start)
                .int("AgeStop", age_stop)
                .text(
                    "StatusID",
                    search.status.unwrap_or(UserStatus::Any).wire_value(),
                )
                .optional_text("ApplicationTag", search.area.app_tag.as_deref());
            Ok(self
                .ctx
                .op(methods::PROFILE_SEARCH, params)
                .list_at(SentinelPolicy::STRICT, origin))
        })
    }

    /// `None` if no such user exists.
    pub fn get_user_by_id(&self, user_id: i64) -> PendingCall<Option<User>> {
        PendingCall::prepare(|| {
            let user_id = require_non_negative("userId", user_id)?;
            let params = self.ctx.params().int("UserIDToFetch", user_id);
            Ok(self
                .ctx
                .op(methods::PROFILE_FROM_ID, params)
                .optional(SentinelPolicy::STRICT))
        })
    }

    pub fn get_user_by_name(&self, name: &str) -> PendingCall<Option<User>> {
        PendingCall::prepare(|| {
            let name = require_text("userName", name)?;
            let params = self.ctx.params().text("UserNameToFetch", name);
            Ok(self
                .ctx
                .op(methods::PROFILE_FROM_NAME, params)
                .optional(SentinelPolicy::STRICT))
        })
    }

    // ============================================================================
    // Profile photos
    // ============================================================================

    pub fn add_profile_photo(&self, photo: Upload, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            if photo.bytes.is_empty() {
                return Err(BuddyError::invalid_argument("photo", "can't be empty"));
            }
            let params = self.ctx.params().optional_text("AppTag", app_tag);
            Ok(self
                .ctx
                .op(methods::PROFILE_PHOTO_ADD, params)
                .with_upload(photo.with_field("bytesFullPhotoData"))
                .boolean(SentinelPolicy::STRICT))
        })
    }

    /// Profile photos of `user_id`, or of the current user when unset.
    pub fn profile_photos(&self, user_id: Option<i64>) -> PendingCall<Vec<Picture>> {
        PendingCall::prepare(|| {
            let user_id = match user_id {
                Some(id) => require_non_negative("userId", id)?,
                None => self.id(),
            };
            let params = self.ctx.params().int("UserProfileID", user_id);
            Ok(self
                .ctx
                .op(methods::PROFILE_PHOTO_GET_ALL, params)
                .list(SentinelPolicy::STRICT))
        })
    }

    pub fn delete_profile_photo(&self, photo_id: i64) -> PendingCall<bool> {
        self.profile_photo_op(methods::PROFILE_PHOTO_DELETE, photo_id)
    }

    pub fn set_profile_photo(&self, photo_id: i64) -> PendingCall<bool> {
        self.profile_photo_op(methods::PROFILE_PHOTO_SET, photo_id)
    }

    fn profile_photo_op(&self, method: &'static str, photo_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let photo_id = require_non_negative("photoId", photo_id)?;
            let params = self.ctx.params().int("ProfilePhotoID", photo_id);
            Ok(self.ctx.op(method, params).boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Raw image bytes; `None` if the photo has no content.
    pub fn profile_photo_bytes(&self, photo_id: i64) -> PendingCall<Option<Vec<u8>>> {
        PendingCall::prepare(|| {
            let photo_id = require_non_negative("photoId", photo_id)?;
            let params = self.ctx.params().int("ProfilePhotoID", photo_id);
            Ok(self.ctx.op(methods::PROFILE_PHOTO_BYTES, params).download())
        })
    }

    // ============================================================================
    // Sub-services
    // ============================================================================

    /// Metadata private to this user.
    pub fn metadata(&self) -> Metadata {
        Metadata::new(Scope::from(&self.ctx), &methods::USER_METADATA)
    }

    pub fn friends(&self) -> Friends {
        Friends::new(self.ctx.clone())
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.ctx.clone())
    }

    pub fn message_groups(&self) -> MessageGroups {
        MessageGroups::new(self.ctx.clone())
    }

    pub fn commerce(&self) -> Commerce {
        Commerce::new(self.ctx.clone())
    }

    pub fn game_scores(&self) -> GameScores {
        GameScores::new(self.ctx.clone())
    }

    pub fn game_players(&self) -> GamePlayers {
        GamePlayers::new(self.ctx.clone())
    }

    pub fn game_state(&self) -> GameState {
        GameState::new(self.ctx.clone())
    }

    pub fn photo_albums(&self) -> PhotoAlbums {
        PhotoAlbums::new(self.ctx.clone())
    }

    pub fn virtual_albums(&self) -> VirtualAlbums {
        VirtualAlbums::new(self.ctx.clone())
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.ctx.clone())
    }

    pub fn blobs(&self) -> Blobs {
        Blobs::new(self.ctx.clone(), &methods::BLOBS)
    }

    pub fn videos(&self) -> Videos {
        Videos::new(self.ctx.clone(), &methods::VIDEOS)
    }

    pub fn devices(&self) -> Devices {
        Devices::new(Scope::from(&self.ctx), self.ctx.app.session.clone())
    }

    /// Push notifications on the platform named in the client configuration.
    pub fn notifications(&self) -> Notifications {
        self.notifications_for(self.ctx.app.config.push_platform)
    }

    pub fn notifications_for(&self, platform: NotificationPlatform) -> Notifications {
        Notifications::new(self.ctx.clone(), platform)
    }

    /// Push notifications through a caller-supplied channel.
    pub fn notifications_via(&self, channel: Arc<dyn PushChannel>) -> Notifications {
        Notifications::with_channel(self.ctx.clone(), channel)
    }
}
