//! Building [`Upload`]s from files on disk.

use std::path::Path;

use buddy_core::{BuddyError, BuddyResult, Upload};

/// Form field used until an operation renames it for its endpoint.
pub const DEFAULT_FIELD: &str = "file";

/// Infers the MIME type from a filename extension using the `mime_guess` library.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Reads `path` into an [`Upload`] named after the file.
pub async fn upload_from_path(path: impl AsRef<Path>) -> BuddyResult<Upload> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| BuddyError::invalid_argument("path", "must name a file"))?
        .to_string();

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read upload from disk");

    Ok(Upload::new(
        DEFAULT_FIELD,
        file_name,
        content_type_for(path),
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type_for(Path::new("a/beach.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(
            content_type_for(Path::new("unknown.zzz")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_upload_from_path_reads_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let upload = upload_from_path(&path).await.expect("Should read file");

        assert_eq!(upload.file_name, "notes.txt");
        assert_eq!(upload.content_type, "text/plain");
        assert_eq!(upload.bytes, b"hello");
        assert_eq!(upload.field, DEFAULT_FIELD);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();

        let err = upload_from_path(dir.path().join("missing.png"))
            .await
            .unwrap_err();

        assert!(matches!(err, BuddyError::Io { .. }));
    }
}
