//! Media upload constants and MIME classification.

/// Maximum accepted upload size in bytes (100 MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Display duration assigned to images and to videos whose duration could
/// not be probed, in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 10.0;

/// MIME types accepted as video uploads.
pub const ALLOWED_VIDEO_TYPES: &[&str] = &["video/mp4", "video/webm", "video/ogg"];

/// MIME types accepted as image uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/svg+xml"];

/// The two stored media kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// The value stored in `media_files.file_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }
}

/// Classify an upload's declared MIME type against the allow-lists.
/// Returns `None` for anything not accepted.
pub fn classify_mime(content_type: &str) -> Option<MediaKind> {
    if ALLOWED_VIDEO_TYPES.contains(&content_type) {
        Some(MediaKind::Video)
    } else if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        Some(MediaKind::Image)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mp4_classified_as_video() {
        assert_eq!(classify_mime("video/mp4"), Some(MediaKind::Video));
    }

    #[test]
    fn png_classified_as_image() {
        assert_eq!(classify_mime("image/png"), Some(MediaKind::Image));
    }

    #[test]
    fn unknown_mime_rejected() {
        assert_eq!(classify_mime("application/pdf"), None);
        assert_eq!(classify_mime("video/x-matroska"), None);
    }

    #[test]
    fn kind_round_trips_to_storage_string() {
        assert_eq!(MediaKind::Video.as_str(), "video");
        assert_eq!(MediaKind::Image.as_str(), "image");
    }
}
