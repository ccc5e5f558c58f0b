//! Media file entity model and DTOs.

use manualcraft_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A media file row from the `media_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaFile {
    pub id: DbId,
    pub project_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    /// Seconds; `None` for images and for videos whose probe failed.
    pub duration: Option<f64>,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// Insert payload for a media file. Built server-side after the upload has
/// been validated and written to blob storage, never deserialized from a
/// request body.
#[derive(Debug, Clone)]
pub struct NewMediaFile {
    pub project_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub duration: Option<f64>,
    pub created_by: DbId,
}
