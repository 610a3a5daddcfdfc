mod common;

use buddy_core::{Upload, WireRecord};
use buddy_interaction::{FileInfo, NearbySearch, NewPicture};
use common::{ScriptedTransport, logged_in};

fn album_row(album_id: i64, name: &str, photo_id: Option<i64>) -> WireRecord {
    let row = WireRecord::new()
        .with("AlbumID", album_id.to_string())
        .with("AlbumName", name)
        .with("UserID", "42")
        .with("PublicAlbumBit", "1");
    match photo_id {
        Some(id) => row
            .with("PhotoID", id.to_string())
            .with("FullPhotoURL", format!("https://cdn.example.com/{id}.jpg"))
            .with("Latitude", "47.6")
            .with("Longitude", "-122.3"),
        None => row,
    }
}

fn photo(bytes: &[u8]) -> Upload {
    Upload::new("file", "beach.jpg", "image/jpeg", bytes.to_vec())
}

#[tokio::test]
async fn test_photo_search_groups_rows_by_album() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_records(vec![
        album_row(1, "Beach", Some(10)),
        album_row(2, "City", Some(20)),
        album_row(1, "Beach", Some(11)),
    ]);

    let albums = user
        .photo_albums()
        .search(&NearbySearch::around(47.6, -122.3).within_meters(1_000))
        .await
        .expect("Should search");

    assert_eq!(albums.len(), 2);
    let beach = &albums[&1];
    assert_eq!(beach.name, "Beach");
    assert_eq!(
        beach.pictures.iter().map(|p| p.id).collect::<Vec<_>>(),
        [10, 11]
    );
    assert_eq!(albums[&2].pictures.len(), 1);
    assert_eq!(transport.methods(), ["Pictures_SearchPhotos_Nearby"]);
}

#[tokio::test]
async fn test_add_picture_uploads_then_fetches() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport
        .reply_text("55")
        .reply_records(vec![album_row(3, "Trip", Some(55))]);

    let mut picture = NewPicture::new(photo(b"jpeg-bytes"));
    picture.comment = Some("sunset".to_string());
    let stored = user
        .photo_albums()
        .add_picture(3, picture)
        .await
        .expect("Should upload")
        .expect("Should fetch stored picture");

    assert_eq!(stored.id, 55);
    assert_eq!(stored.album_id, 3);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "Pictures_Photo_Add");
    assert_eq!(calls[0].params.get("PhotoComment"), Some("sunset"));
    let upload = calls[0].upload.as_ref().expect("Should carry the file");
    assert_eq!(upload.field, "bytesFullPhotoData");
    assert_eq!(upload.bytes, b"jpeg-bytes");
    assert_eq!(calls[1].method, "Pictures_Photo_Get");
    assert_eq!(calls[1].params.get("PhotoID"), Some("55"));
}

#[tokio::test]
async fn test_failed_upload_skips_fetch() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.fail("connection reset");

    let err = user
        .photo_albums()
        .add_picture(3, NewPicture::new(photo(b"jpeg-bytes")))
        .await
        .expect_err("Upload failure should fail the call");

    assert!(err.is_transport());
    assert_eq!(transport.methods(), ["Pictures_Photo_Add"]);
}

#[tokio::test]
async fn test_empty_picture_is_rejected() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;

    let err = user
        .photo_albums()
        .add_picture(3, NewPicture::new(photo(b"")))
        .await
        .unwrap_err();

    assert_eq!(err.argument_name(), Some("picture"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_virtual_album_get_fetches_info_then_pictures() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport
        .reply_records(vec![
            WireRecord::new()
                .with("VirtualAlbumID", "8")
                .with("Name", "Favorites")
                .with("UserID", "42"),
        ])
        .reply_records(vec![
            WireRecord::new().with("PhotoID", "100"),
            WireRecord::new().with("PhotoID", "101"),
        ]);

    let album = user
        .virtual_albums()
        .get(8)
        .await
        .unwrap()
        .expect("Album should exist");

    assert_eq!(album.name, "Favorites");
    assert_eq!(album.pictures.len(), 2);
    assert_eq!(
        transport.methods(),
        [
            "Pictures_VirtualAlbum_GetAlbumInformation",
            "Pictures_VirtualAlbum_Get",
        ]
    );
}

#[tokio::test]
async fn test_missing_virtual_album_makes_one_call() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_records(Vec::new());

    let album = user.virtual_albums().get(8).await.unwrap();

    assert!(album.is_none());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_blob_add_and_download() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport
        .reply_text("7")
        .reply_records(vec![
            WireRecord::new()
                .with("BlobID", "7")
                .with("FriendlyName", "notes")
                .with("MimeType", "text/plain")
                .with("FileSize", "5"),
        ])
        .reply_bytes(b"hello".to_vec());

    let info = FileInfo {
        friendly_name: Some("notes".to_string()),
        ..Default::default()
    };
    let blob = user
        .blobs()
        .add(Upload::new("file", "notes.txt", "text/plain", b"hello".to_vec()), &info)
        .await
        .unwrap()
        .expect("Should return stored blob");
    assert_eq!(blob.file.id, 7);
    assert_eq!(blob.file.mime_type, "text/plain");

    let bytes = user.blobs().download(7).await.unwrap();
    assert_eq!(bytes.as_deref(), Some(&b"hello"[..]));

    let calls = transport.calls();
    assert_eq!(calls[0].method, "Blobs_Blob_AddBlob");
    assert_eq!(calls[0].upload.as_ref().map(|u| u.field.as_str()), Some("blobData"));
    assert_eq!(calls[1].params.get("BlobID"), Some("7"));
    assert_eq!(calls[2].method, "Blobs_Blob_GetBlob");
}

#[tokio::test]
async fn test_empty_download_is_none() {
    let transport = ScriptedTransport::new();
    let user = logged_in(&transport, "ada").await;
    transport.reply_bytes(Vec::new());

    assert!(user.videos().download(3).await.unwrap().is_none());
    assert_eq!(transport.methods(), ["Videos_Video_GetVideo"]);
}
