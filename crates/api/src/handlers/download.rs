//! Handler for the project export download.
//!
//! `GET /download/{project_id}?shared_key=` accepts either an
//! authenticated session with read access or a valid share key matching
//! the project, and streams back a ZIP with the standalone HTML viewer
//! and the media blobs.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use manualcraft_core::access;
use manualcraft_core::error::CoreError;
use manualcraft_core::types::DbId;
use manualcraft_db::repositories::ShareRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::export;
use crate::handlers::projects::{fetch_project, load_detail, project_ref};
use crate::middleware::auth::authenticate;
use crate::state::AppState;
use crate::storage::sanitize_file_name;

/// Query parameters for the download route.
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub shared_key: Option<String>,
}

/// GET /api/v1/download/{project_id}?shared_key=
pub async fn download(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<DownloadParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let project = fetch_project(&state, project_id).await?;

    // A valid share key for THIS project grants read; otherwise fall back
    // to normal session authentication.
    let authorized = match &params.shared_key {
        Some(key) => ShareRepo::find_valid_by_key(&state.pool, key)
            .await?
            .is_some_and(|share| share.project_id == project_id),
        None => false,
    };
    if !authorized {
        let user = authenticate(&state, &headers).await?;
        if !access::can_read_project(&user.principal(), project_ref(&project)) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have access to this project".into(),
            )));
        }
    }

    let detail = load_detail(&state, project_id).await?;
    let archive = export::build_archive(&state.config.upload_dir, &detail).await?;

    let file_name = format!("{}.zip", sanitize_file_name(&detail.project.title));
    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((StatusCode::OK, headers, archive).into_response())
}
