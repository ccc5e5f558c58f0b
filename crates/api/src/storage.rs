//! Local blob storage for uploaded media.
//!
//! Blobs live under `{upload_dir}/project_{id}/` with a generated unique
//! file name; the original name is kept on the database row. Paths stored
//! in `media_files.file_path` are relative to the upload directory and are
//! served at `/uploads/{file_path}`.

use std::path::{Path, PathBuf};

use manualcraft_core::types::DbId;

/// Replace anything outside `[A-Za-z0-9._-]` so a client-supplied file name
/// cannot escape the project directory or break URLs.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Write an uploaded blob to disk, returning its path relative to the
/// upload directory.
///
/// The stored name is prefixed with a millisecond timestamp so repeated
/// uploads of the same file never collide.
pub async fn save_blob(
    upload_dir: &str,
    project_id: DbId,
    original_name: &str,
    data: &[u8],
) -> std::io::Result<String> {
    let stamp = chrono::Utc::now().timestamp_millis();
    let file_name = format!("{stamp}_{}", sanitize_file_name(original_name));
    let relative = format!("project_{project_id}/{file_name}");

    let dest = Path::new(upload_dir).join(&relative);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&dest, data).await?;

    Ok(relative)
}

/// Resolve a stored relative path against the upload directory.
///
/// Returns `None` for absolute paths or paths containing `..`; rows are
/// written by [`save_blob`] so anything else is corrupt or hostile.
pub fn resolve_blob(upload_dir: &str, relative: &str) -> Option<PathBuf> {
    let rel = Path::new(relative);
    if rel.is_absolute()
        || rel
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return None;
    }
    Some(Path::new(upload_dir).join(rel))
}

/// Remove a stored blob, logging and swallowing failures. Physical cleanup
/// is best-effort; the logical delete has already committed.
pub async fn remove_blob(upload_dir: &str, relative: &str) {
    let Some(path) = resolve_blob(upload_dir, relative) else {
        tracing::warn!(%relative, "Refusing to remove blob with suspicious path");
        return;
    };
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove blob");
    }
}
