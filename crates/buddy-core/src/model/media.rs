//! Pictures, albums, blobs and videos.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;
use super::hydrate::{Hydrate, HydrationError};
use crate::transport::WireRecord;

/// A picture inside a photo album or a virtual album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub id: i64,
    pub album_id: i64,
    pub full_url: String,
    pub thumbnail_url: String,
    pub comment: String,
    pub app_tag: String,
    pub location: Option<GeoPoint>,
    pub added_on: Option<NaiveDateTime>,
}

impl Hydrate for Picture {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("PhotoID")?,
            album_id: record.optional_int("AlbumID")?.unwrap_or(-1),
            full_url: record.text_or_empty("FullPhotoURL"),
            thumbnail_url: record.text_or_empty("ThumbnailPhotoURL"),
            comment: record.text_or_empty("PhotoComment"),
            app_tag: record.text_or_empty("ApplicationTag"),
            location: record.position("Latitude", "Longitude")?,
            added_on: record.optional_timestamp("PhotoAdded")?,
        })
    }
}

/// A user-owned photo album with its pictures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAlbum {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub is_public: bool,
    pub app_tag: String,
    pub created: Option<NaiveDateTime>,
    pub last_updated: Option<NaiveDateTime>,
    pub pictures: Vec<Picture>,
}

impl Hydrate for PhotoAlbum {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("AlbumID")?,
            name: record.required("AlbumName")?,
            owner_id: record.optional_int("UserID")?.unwrap_or(-1),
            is_public: record.optional_flag("PublicAlbumBit")?,
            app_tag: record.text_or_empty("ApplicationTag"),
            created: record.optional_timestamp("CreatedDate")?,
            last_updated: record.optional_timestamp("LastUpdated")?,
            pictures: Vec::new(),
        })
    }
}

impl PhotoAlbum {
    /// Folds rows of the "album + one picture per row" shape into albums keyed
    /// by album id. Rows without a `PhotoID` only contribute the album itself.
    pub fn group_rows(records: &[WireRecord]) -> Result<BTreeMap<i64, PhotoAlbum>, HydrationError> {
        let mut albums: BTreeMap<i64, PhotoAlbum> = BTreeMap::new();
        for record in records {
            let album_id = record.int("AlbumID")?;
            if !albums.contains_key(&album_id) {
                albums.insert(album_id, PhotoAlbum::hydrate(record)?);
            }
            if record.optional_int("PhotoID")?.is_some() {
                let picture = Picture::hydrate(record)?;
                if let Some(album) = albums.get_mut(&album_id) {
                    album.pictures.push(picture);
                }
            }
        }
        Ok(albums)
    }
}

/// A curated album that references pictures from any owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualAlbum {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub cover_picture_url: String,
    pub app_tag: String,
    pub created: Option<NaiveDateTime>,
    pub last_updated: Option<NaiveDateTime>,
    pub pictures: Vec<Picture>,
}

impl Hydrate for VirtualAlbum {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int("VirtualAlbumID")?,
            name: record.required("Name")?,
            owner_id: record.optional_int("UserID")?.unwrap_or(-1),
            cover_picture_url: record.text_or_empty("PhotoCoverURL"),
            app_tag: record.text_or_empty("ApplicationTag"),
            created: record.optional_timestamp("CreatedDateTime")?,
            last_updated: record.optional_timestamp("LastUpdatedDateTime")?,
            pictures: Vec::new(),
        })
    }
}

impl VirtualAlbum {
    pub fn with_pictures(mut self, pictures: Vec<Picture>) -> Self {
        self.pictures = pictures;
        self
    }
}

/// Metadata of an uploaded file (blob or video). The payload itself is
/// fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: i64,
    pub friendly_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub app_tag: String,
    pub owner_id: i64,
    pub location: Option<GeoPoint>,
    pub upload_date: Option<NaiveDateTime>,
    pub last_touch_date: Option<NaiveDateTime>,
}

impl StoredFile {
    fn hydrate_with_id(record: &WireRecord, id_field: &str) -> Result<Self, HydrationError> {
        Ok(Self {
            id: record.int(id_field)?,
            friendly_name: record.text_or_empty("FriendlyName"),
            mime_type: record.text_or_empty("MimeType"),
            file_size: record.optional_int("FileSize")?.unwrap_or_default(),
            app_tag: record.text_or_empty("AppTag"),
            owner_id: record.optional_int("OwnerID")?.unwrap_or(-1),
            location: record.position("Latitude", "Longitude")?,
            upload_date: record.optional_timestamp("UploadDate")?,
            last_touch_date: record.optional_timestamp("LastTouchDate")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    #[serde(flatten)]
    pub file: StoredFile,
}

impl Hydrate for Blob {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            file: StoredFile::hydrate_with_id(record, "BlobID")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(flatten)]
    pub file: StoredFile,
    pub video_url: String,
}

impl Hydrate for Video {
    fn hydrate(record: &WireRecord) -> Result<Self, HydrationError> {
        Ok(Self {
            file: StoredFile::hydrate_with_id(record, "VideoID")?,
            video_url: record.text_or_empty("VideoURL"),
        })
    }
}
