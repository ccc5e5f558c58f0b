//! Handlers for the `/media` resource.
//!
//! Upload is multipart (`project_id` + `file`); blobs land under the
//! upload directory and every media row carries a timeline row.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use manualcraft_core::access;
use manualcraft_core::error::CoreError;
use manualcraft_core::media::{classify_mime, MediaKind, DEFAULT_DURATION_SECS};
use manualcraft_core::probe::video_duration_secs;
use manualcraft_core::types::DbId;
use manualcraft_db::models::media::{MediaFile, NewMediaFile};
use manualcraft_db::repositories::MediaRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{fetch_project, project_ref};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage;

/// Query parameters for `GET /media`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub project_id: DbId,
}

/// POST /api/v1/media
///
/// Multipart upload: a `project_id` text field and a `file` field. The
/// MIME type decides video vs image; videos get their duration probed with
/// a 10 s fallback.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MediaFile>)> {
    let mut project_id: Option<DbId> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("project_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text.trim().parse().map_err(|_| {
                    AppError::Core(CoreError::Validation("project_id must be an integer".into()))
                })?;
                project_id = Some(id);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let project_id = project_id.ok_or(AppError::Core(CoreError::Validation(
        "project_id field is required".into(),
    )))?;
    let (file_name, content_type, data) = file.ok_or(AppError::Core(CoreError::Validation(
        "file field is required".into(),
    )))?;

    let project = fetch_project(&state, project_id).await?;
    if !access::can_add_content(&user.principal(), project.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot add media to this project".into(),
        )));
    }

    let kind = classify_mime(&content_type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unsupported file type: {content_type}"
        )))
    })?;
    if data.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded file is empty".into(),
        )));
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::Core(CoreError::Validation(format!(
            "File exceeds the maximum upload size of {} bytes",
            state.config.max_upload_bytes
        ))));
    }

    let file_path = storage::save_blob(&state.config.upload_dir, project_id, &file_name, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    // Probe the stored blob; a failed probe leaves duration NULL and the
    // timeline falls back to the display default.
    let duration = match kind {
        MediaKind::Video => {
            let abs = storage::resolve_blob(&state.config.upload_dir, &file_path);
            match abs {
                Some(abs) => match video_duration_secs(&abs).await {
                    Ok(d) => Some(d),
                    Err(e) => {
                        tracing::warn!(%file_path, error = %e, "Duration probe failed");
                        None
                    }
                },
                None => None,
            }
        }
        MediaKind::Image => None,
    };
    let timeline_end = duration.unwrap_or(DEFAULT_DURATION_SECS);

    let media = MediaRepo::create_with_timeline(
        &state.pool,
        &NewMediaFile {
            project_id,
            file_name,
            file_path,
            file_type: kind.as_str().to_string(),
            file_size: data.len() as i64,
            duration,
            created_by: user.user_id,
        },
        timeline_end,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(media)))
}

/// GET /api/v1/media?project_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<MediaFile>>> {
    let project = fetch_project(&state, params.project_id).await?;
    if !access::can_read_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    let media = MediaRepo::list_by_project(&state.pool, params.project_id).await?;
    Ok(Json(media))
}

/// GET /api/v1/media/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaFile>> {
    let media = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Media", id }))?;
    let project = fetch_project(&state, media.project_id).await?;
    if !access::can_read_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    Ok(Json(media))
}

/// DELETE /api/v1/media/{id}
///
/// Delete is stricter than update: project owner, uploader, or admin.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let media = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Media", id }))?;
    let project = fetch_project(&state, media.project_id).await?;
    if !access::can_delete_content(&user.principal(), project.created_by, media.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete this media file".into(),
        )));
    }

    if let Some(file_path) = MediaRepo::delete_with_timeline(&state.pool, id).await? {
        storage::remove_blob(&state.config.upload_dir, &file_path).await;
    }
    Ok(StatusCode::NO_CONTENT)
}
