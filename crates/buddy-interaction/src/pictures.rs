//! Photo albums and virtual albums.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use buddy_core::model::{PhotoAlbum, Picture, VirtualAlbum};
use buddy_core::params::{require_non_negative, require_text};
use buddy_core::{BuddyError, PendingCall, SentinelPolicy, Upload};

use crate::context::UserContext;
use crate::methods;
use crate::search::{NearbySearch, location_params, since};

const PHOTO_FIELD: &str = "bytesFullPhotoData";

/// A picture to upload into an album.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPicture {
    pub file: Upload,
    pub comment: Option<String>,
    pub location: Option<(f64, f64)>,
    pub app_tag: Option<String>,
}

impl NewPicture {
    pub fn new(file: Upload) -> Self {
        Self {
            file,
            comment: None,
            location: None,
            app_tag: None,
        }
    }
}

/// Albums owned by the current user.
#[derive(Clone)]
pub struct PhotoAlbums {
    ctx: UserContext,
}

impl PhotoAlbums {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    /// Creates an album and returns it as stored.
    pub fn create(&self, name: &str, public: bool, app_tag: Option<&str>) -> PendingCall<Option<PhotoAlbum>> {
        PendingCall::prepare(|| {
            let name = require_text("name", name)?;
            let params = self
                .ctx
                .params()
                .text("AlbumName", name)
                .flag("PublicAlbumBit", public)
                .optional_text("ApplicationTag", app_tag);
            let albums = self.clone();
            Ok(self
                .ctx
                .op(methods::ALBUM_CREATE, params)
                .integer(SentinelPolicy::STRICT)
                .and_then(move |album_id| match album_id {
                    Some(album_id) => albums.fetch(album_id),
                    None => PendingCall::ready(None),
                }))
        })
    }

    /// One album with its pictures; `None` if it doesn't exist.
    pub fn get(&self, album_id: i64) -> PendingCall<Option<PhotoAlbum>> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            Ok(self.fetch(album_id))
        })
    }

    fn fetch(&self, album_id: i64) -> PendingCall<Option<PhotoAlbum>> {
        let params = self
            .ctx
            .params()
            .int("UserProfileID", self.ctx.user_id)
            .int("PhotoAlbumID", album_id);
        self.ctx
            .op(methods::ALBUM_GET, params)
            .grouped(SentinelPolicy::STRICT, PhotoAlbum::group_rows)
            .map(move |mut albums| albums.remove(&album_id))
    }

    /// Every album of `user_id` (the current user when unset) updated after
    /// `after`.
    pub fn get_all(
        &self,
        user_id: Option<i64>,
        after: Option<NaiveDateTime>,
    ) -> PendingCall<Vec<PhotoAlbum>> {
        PendingCall::prepare(|| {
            let user_id = match user_id {
                Some(id) => require_non_negative("userId", id)?,
                None => self.ctx.user_id,
            };
            let params = self.ctx.params().int("UserProfileID", user_id);
            let params = since(params, "SearchFromDateTime", after);
            Ok(self
                .ctx
                .op(methods::ALBUM_GET_ALL, params)
                .grouped(SentinelPolicy::STRICT, PhotoAlbum::group_rows)
                .map(|albums| albums.into_values().collect()))
        })
    }

    pub fn delete(&self, album_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            let params = self.ctx.params().int("PhotoAlbumID", album_id);
            Ok(self
                .ctx
                .op(methods::ALBUM_DELETE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Uploads a picture, then fetches its stored description. The second
    /// call only happens once the upload has succeeded.
    pub fn add_picture(&self, album_id: i64, picture: NewPicture) -> PendingCall<Option<Picture>> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            if picture.file.bytes.is_empty() {
                return Err(BuddyError::invalid_argument("picture", "can't be empty"));
            }
            let params = self
                .ctx
                .params()
                .int("AlbumID", album_id)
                .optional_text("PhotoComment", picture.comment.as_deref());
            let params = location_params(params, picture.location, "Latitude", "Longitude")?
                .optional_text("ApplicationTag", picture.app_tag.as_deref());
            let ctx = self.ctx.clone();
            Ok(self
                .ctx
                .op(methods::PHOTO_ADD, params)
                .with_upload(picture.file.with_field(PHOTO_FIELD))
                .integer(SentinelPolicy::STRICT)
                .and_then(move |photo_id| match photo_id {
                    Some(photo_id) => {
                        let params = ctx
                            .params()
                            .int("UserProfileID", ctx.user_id)
                            .int("PhotoID", photo_id);
                        ctx.op(methods::PHOTO_GET, params)
                            .optional(SentinelPolicy::STRICT)
                    }
                    None => PendingCall::ready(None),
                }))
        })
    }

    pub fn delete_picture(&self, photo_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let photo_id = require_non_negative("photoId", photo_id)?;
            let params = self.ctx.params().int("PhotoID", photo_id);
            Ok(self
                .ctx
                .op(methods::PHOTO_DELETE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn set_picture_app_tag(&self, photo_id: i64, app_tag: &str) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let photo_id = require_non_negative("photoId", photo_id)?;
            let params = self
                .ctx
                .params()
                .int("PhotoID", photo_id)
                .text("ApplicationTag", app_tag);
            Ok(self
                .ctx
                .op(methods::PHOTO_SET_APP_TAG, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Public pictures near a point, grouped into their albums.
    pub fn search(&self, search: &NearbySearch) -> PendingCall<BTreeMap<i64, PhotoAlbum>> {
        PendingCall::prepare(|| {
            let (params, _) = search.apply(self.ctx.params(), "Latitude", "Longitude")?;
            Ok(self
                .ctx
                .op(methods::PHOTO_SEARCH_NEARBY, params)
                .grouped(SentinelPolicy::STRICT, PhotoAlbum::group_rows))
        })
    }
}

/// Curated albums referencing existing pictures.
#[derive(Clone)]
pub struct VirtualAlbums {
    ctx: UserContext,
}

impl VirtualAlbums {
    pub(crate) fn new(ctx: UserContext) -> Self {
        Self { ctx }
    }

    pub fn create(&self, name: &str, app_tag: Option<&str>) -> PendingCall<Option<VirtualAlbum>> {
        PendingCall::prepare(|| {
            let name = require_text("name", name)?;
            let params = self
                .ctx
                .params()
                .text("AlbumName", name)
                .optional_text("ApplicationTag", app_tag);
            let albums = self.clone();
            Ok(self
                .ctx
                .op(methods::VIRTUAL_ALBUM_CREATE, params)
                .integer(SentinelPolicy::STRICT)
                .and_then(move |album_id| match album_id {
                    Some(album_id) => albums.fetch(album_id),
                    None => PendingCall::ready(None),
                }))
        })
    }

    /// The album with its pictures. Album information and pictures come from
    /// two calls made in sequence.
    pub fn get(&self, album_id: i64) -> PendingCall<Option<VirtualAlbum>> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            Ok(self.fetch(album_id))
        })
    }

    fn fetch(&self, album_id: i64) -> PendingCall<Option<VirtualAlbum>> {
        let params = self.ctx.params().int("VirtualAlbumID", album_id);
        let ctx = self.ctx.clone();
        self.ctx
            .op(methods::VIRTUAL_ALBUM_INFO, params.clone())
            .optional::<VirtualAlbum>(SentinelPolicy::STRICT)
            .and_then(move |album| match album {
                Some(album) => ctx
                    .op(methods::VIRTUAL_ALBUM_PICTURES, params)
                    .list::<Picture>(SentinelPolicy::STRICT)
                    .map(move |pictures| Some(album.with_pictures(pictures))),
                None => PendingCall::ready(None),
            })
    }

    /// Albums owned by the current user, without their pictures.
    pub fn get_mine(&self) -> PendingCall<Vec<VirtualAlbum>> {
        self.ctx
            .op(methods::VIRTUAL_ALBUM_GET_MINE, self.ctx.params())
            .list(SentinelPolicy::STRICT)
    }

    pub fn add_picture(&self, album_id: i64, photo_id: i64) -> PendingCall<bool> {
        self.picture_op(methods::VIRTUAL_ALBUM_ADD_PHOTO, album_id, photo_id)
    }

    pub fn remove_picture(&self, album_id: i64, photo_id: i64) -> PendingCall<bool> {
        self.picture_op(methods::VIRTUAL_ALBUM_REMOVE_PHOTO, album_id, photo_id)
    }

    fn picture_op(&self, method: &'static str, album_id: i64, photo_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            let photo_id = require_non_negative("photoId", photo_id)?;
            let params = self
                .ctx
                .params()
                .int("VirtualAlbumID", album_id)
                .int("ExistingPhotoID", photo_id);
            Ok(self
                .ctx
                .op(method, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn update(&self, album_id: i64, name: &str, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            let name = require_text("name", name)?;
            let params = self
                .ctx
                .params()
                .int("VirtualAlbumID", album_id)
                .text("NewAlbumName", name)
                .optional_text("NewAppTag", app_tag);
            Ok(self
                .ctx
                .op(methods::VIRTUAL_ALBUM_UPDATE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn delete(&self, album_id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let album_id = require_non_negative("albumId", album_id)?;
            let params = self.ctx.params().int("VirtualAlbumID", album_id);
            Ok(self
                .ctx
                .op(methods::VIRTUAL_ALBUM_DELETE, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }
}
