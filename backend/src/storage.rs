//! Local storage for uploaded item photos
//!
//! Files land under the configured uploads directory and are referenced by a
//! `/uploads/<name>` URL; serving that path is the front end's concern.

use std::path::Path;

use crate::error::{AppError, AppResult};

/// Write an uploaded photo to disk and return its reference URL.
///
/// The stored name embeds the item code so re-uploads for different items
/// never clash; the original filename is sanitized to its final path
/// component.
pub async fn store_item_photo(
    uploads_dir: &str,
    item_code: &str,
    original_filename: &str,
    bytes: &[u8],
) -> AppResult<String> {
    let safe_name = Path::new(original_filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("foto");

    let file_name = format!("img_{}_{}", item_code, safe_name);
    let path = Path::new(uploads_dir).join(&file_name);

    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| AppError::StorageError(e.to_string()))?;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::StorageError(e.to_string()))?;

    Ok(format!("/uploads/{}", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_reference_photo() {
        let dir = std::env::temp_dir().join("wms-uploads-test");
        let dir = dir.to_str().unwrap();

        let url = store_item_photo(dir, "ITM-20240101000000", "foto.png", b"png-bytes")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/img_ITM-20240101000000_foto.png");

        let stored = std::path::Path::new(dir).join("img_ITM-20240101000000_foto.png");
        assert_eq!(std::fs::read(stored).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_path_components_stripped_from_filename() {
        let dir = std::env::temp_dir().join("wms-uploads-test");
        let dir = dir.to_str().unwrap();

        let url = store_item_photo(dir, "ITM-1", "../../etc/passwd", b"x")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/img_ITM-1_passwd");
    }
}
