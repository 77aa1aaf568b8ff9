use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, instrument};

use crate::error::{RDescribeError, Result};

/// An image attached inline to a model request.
///
/// The payload is held base64-encoded, ready to be placed in a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub mime_type: String,
    pub data: String,
}

impl MediaFile {
    /// Wrap raw bytes with an explicit MIME type.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Read an image from disk, picking the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// [`RDescribeError::InvalidInput`] if the extension is not a supported image
    /// type or the file cannot be read.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_type_for(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            RDescribeError::invalid_input(format!("cannot read image '{}': {}", path.display(), e))
        })?;
        debug!(bytes = bytes.len(), mime_type, "Loaded image");
        Ok(Self::from_bytes(&bytes, mime_type))
    }
}

/// Map an image file extension to the MIME type the model API expects.
pub fn mime_type_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        "heic" => Ok("image/heic"),
        "heif" => Ok("image/heif"),
        _ => Err(RDescribeError::invalid_input(format!(
            "unsupported image type for '{}'",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_encodes_base64() {
        let media = MediaFile::from_bytes(b"abc", "image/png");
        assert_eq!(media.data, "YWJj");
        assert_eq!(media.mime_type, "image/png");
    }

    #[test]
    fn test_mime_type_for_extensions() {
        assert_eq!(mime_type_for(Path::new("a/b.PNG")).unwrap(), "image/png");
        assert_eq!(mime_type_for(Path::new("b.jpeg")).unwrap(), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("b.jpg")).unwrap(), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("b.webp")).unwrap(), "image/webp");
        assert!(matches!(
            mime_type_for(Path::new("notes.txt")),
            Err(RDescribeError::InvalidInput(_))
        ));
        assert!(mime_type_for(Path::new("no_extension")).is_err());
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tiny.gif");
        std::fs::write(&path, b"GIF89a").expect("write fixture");

        let media = MediaFile::from_path(&path).await.expect("image should load");
        assert_eq!(media.mime_type, "image/gif");
        assert_eq!(media.data, BASE64.encode(b"GIF89a"));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = MediaFile::from_path("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, RDescribeError::InvalidInput(_)));
    }
}
