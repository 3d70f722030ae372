//! Upload validation and storage-name generation for the image pipeline.
//!
//! A file is accepted only when both its extension and its declared
//! mimetype are on the image allow-list, and it fits the size cap.  The
//! name it is stored under is generated here; the original filename is kept
//! purely for display and never reaches the filesystem.

use chrono::Utc;

use crate::error::ApiError;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];
const ALLOWED_MIMETYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Check one upload against the allow-lists and the size cap.
///
/// Both the extension and the mimetype check must pass, so a renamed
/// binary fails on its mimetype and a mislabeled one fails on its name.
pub fn validate(filename: &str, mimetype: &str, size: usize, max_size: usize) -> Result<(), ApiError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Only image files are allowed (got '{filename}')"
        )));
    }

    if !ALLOWED_MIMETYPES.contains(&mimetype) {
        return Err(ApiError::BadRequest(format!(
            "Only image files are allowed (got '{mimetype}')"
        )));
    }

    if size == 0 {
        return Err(ApiError::BadRequest("Empty upload".to_string()));
    }

    if size > max_size {
        return Err(ApiError::BadRequest(format!(
            "File too large: {size} bytes (max {max_size})"
        )));
    }

    Ok(())
}

/// Generate a collision-resistant storage name for an upload.
///
/// Shape: `<unix-millis>-<random>-<sanitized original name>`.  The result
/// contains no path separators and no `..`, so it survives the content
/// store's traversal guard on read-back.
pub fn storage_name(original: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>(),
        sanitize(original)
    )
}

/// Content type for serving a stored file, from its extension.
pub fn mime_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpeg" | "jpg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

fn sanitize(original: &str) -> String {
    let mut name: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Collapse dot runs so the generated name can never read as traversal.
    while name.contains("..") {
        name = name.replace("..", ".");
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 10 * 1024 * 1024;

    #[test]
    fn accepts_a_normal_png() {
        assert!(validate("scan.png", "image/png", 1024, MAX).is_ok());
        assert!(validate("photo.JPG", "image/jpeg", 1024, MAX).is_ok());
    }

    #[test]
    fn rejects_disallowed_extension() {
        assert!(validate("tool.exe", "image/png", 1024, MAX).is_err());
        assert!(validate("noextension", "image/png", 1024, MAX).is_err());
    }

    #[test]
    fn rejects_mismatched_mimetype() {
        // A .png name is not enough on its own.
        assert!(validate("scan.png", "application/octet-stream", 1024, MAX).is_err());
        assert!(validate("scan.png", "text/html", 1024, MAX).is_err());
    }

    #[test]
    fn rejects_oversize_and_empty_files() {
        assert!(validate("scan.png", "image/png", MAX + 1, MAX).is_err());
        assert!(validate("scan.png", "image/png", 0, MAX).is_err());
        assert!(validate("scan.png", "image/png", MAX, MAX).is_ok());
    }

    #[test]
    fn storage_names_are_unique_and_traversal_safe() {
        let a = storage_name("scan.png");
        let b = storage_name("scan.png");
        assert_ne!(a, b);

        for hostile in ["../../etc/passwd", "..\\boot.ini", "a/b/c.png", "....png"] {
            let name = storage_name(hostile);
            assert!(!name.contains('/'), "{name}");
            assert!(!name.contains('\\'), "{name}");
            assert!(!name.contains(".."), "{name}");
        }
    }

    #[test]
    fn storage_name_keeps_a_recognizable_suffix() {
        let name = storage_name("lab result (2).png");
        assert!(name.ends_with("lab_result__2_.png"), "{name}");
    }

    #[test]
    fn mime_for_known_and_unknown_extensions() {
        assert_eq!(mime_for("123-456-scan.png"), "image/png");
        assert_eq!(mime_for("a.JPEG"), "image/jpeg");
        assert_eq!(mime_for("a.webp"), "image/webp");
        assert_eq!(mime_for("weird.bin"), "application/octet-stream");
    }
}
