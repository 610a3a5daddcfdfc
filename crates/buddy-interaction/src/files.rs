//! Blob and video storage.
//!
//! Blobs and videos have the same operations and differ only in method
//! names, the id parameter and the entity they hydrate into.

use std::marker::PhantomData;

use buddy_core::model::{Blob, Hydrate, Video};
use buddy_core::params::{require_non_negative, require_text};
use buddy_core::{BuddyError, PendingCall, SentinelPolicy, Upload};

use crate::context::UserContext;
use crate::methods::FileMethods;
use crate::search::{NearbySearch, location_params};

/// Descriptive fields stored next to a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileInfo {
    pub friendly_name: Option<String>,
    pub app_tag: Option<String>,
    pub location: Option<(f64, f64)>,
}

/// Filters for listing or searching stored files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSearch {
    pub area: NearbySearch,
    pub friendly_name: Option<String>,
    pub mime_type: Option<String>,
}

pub type Blobs = StoredFiles<Blob>;
pub type Videos = StoredFiles<Video>;

pub struct StoredFiles<T> {
    ctx: UserContext,
    methods: &'static FileMethods,
    entity: PhantomData<fn() -> T>,
}

impl<T> Clone for StoredFiles<T> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            methods: self.methods,
            entity: PhantomData,
        }
    }
}

impl<T: Hydrate + Send + 'static> StoredFiles<T> {
    pub(crate) fn new(ctx: UserContext, methods: &'static FileMethods) -> Self {
        Self {
            ctx,
            methods,
            entity: PhantomData,
        }
    }

    /// Uploads `file`, then fetches what the service stored. The info call is
    /// only made after the upload succeeds.
    pub fn add(&self, file: Upload, info: &FileInfo) -> PendingCall<Option<T>> {
        PendingCall::prepare(|| {
            if file.bytes.is_empty() {
                return Err(BuddyError::invalid_argument("file", "can't be empty"));
            }
            let params = self
                .ctx
                .params()
                .optional_text("FriendlyName", info.friendly_name.as_deref())
                .optional_text("AppTag", info.app_tag.as_deref());
            let params = location_params(params, info.location, "Latitude", "Longitude")?;
            let files = self.clone();
            Ok(self
                .ctx
                .op(self.methods.add, params)
                .with_upload(file.with_field(self.methods.upload_field))
                .integer(SentinelPolicy::STRICT)
                .and_then(move |id| match id {
                    Some(id) => files.fetch_info(id),
                    None => PendingCall::ready(None),
                }))
        })
    }

    pub fn info(&self, id: i64) -> PendingCall<Option<T>> {
        PendingCall::prepare(|| {
            let id = require_non_negative("id", id)?;
            Ok(self.fetch_info(id))
        })
    }

    fn fetch_info(&self, id: i64) -> PendingCall<Option<T>> {
        let params = self.ctx.params().int(self.methods.id_param, id);
        self.ctx
            .op(self.methods.info, params)
            .optional(SentinelPolicy::STRICT)
    }

    /// The stored bytes; `None` for an empty file.
    pub fn download(&self, id: i64) -> PendingCall<Option<Vec<u8>>> {
        PendingCall::prepare(|| {
            let id = require_non_negative("id", id)?;
            let params = self.ctx.params().int(self.methods.id_param, id);
            Ok(self.ctx.op(self.methods.download, params).download())
        })
    }

    pub fn edit(&self, id: i64, friendly_name: &str, app_tag: Option<&str>) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let id = require_non_negative("id", id)?;
            let friendly_name = require_text("friendlyName", friendly_name)?;
            let params = self
                .ctx
                .params()
                .int(self.methods.id_param, id)
                .text("FriendlyName", friendly_name)
                .optional_text("AppTag", app_tag);
            Ok(self
                .ctx
                .op(self.methods.edit, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    pub fn delete(&self, id: i64) -> PendingCall<bool> {
        PendingCall::prepare(|| {
            let id = require_non_negative("id", id)?;
            let params = self.ctx.params().int(self.methods.id_param, id);
            Ok(self
                .ctx
                .op(self.methods.delete, params)
                .boolean(SentinelPolicy::NEGATIVE_ONE))
        })
    }

    /// Files owned by the current user.
    pub fn list(&self, search: &FileSearch) -> PendingCall<Vec<T>> {
        PendingCall::prepare(|| {
            let (params, _) = search.area.apply(self.ctx.params(), "Latitude", "Longitude")?;
            let params = params
                .int("UserID", self.ctx.user_id)
                .optional_text("SearchFriendlyName", search.friendly_name.as_deref())
                .optional_text("SearchAppTag", search.area.app_tag.as_deref());
            Ok(self
                .ctx
                .op(self.methods.list, params)
                .list(SentinelPolicy::STRICT))
        })
    }

    /// Files of every user matching the filter.
    pub fn search(&self, search: &FileSearch) -> PendingCall<Vec<T>> {
        PendingCall::prepare(|| {
            let (params, _) = search.area.apply(self.ctx.params(), "Latitude", "Longitude")?;
            let params = params
                .optional_text("FriendlyName", search.friendly_name.as_deref())
                .optional_text("MimeType", search.mime_type.as_deref())
                .optional_text("AppTag", search.area.app_tag.as_deref());
            Ok(self
                .ctx
                .op(self.methods.search, params)
                .list(SentinelPolicy::STRICT))
        })
    }
}
