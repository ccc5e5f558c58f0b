//! Handlers for project share links.
//!
//! A project has at most one link; regenerating overwrites the key and
//! resets the 30-day expiry. `GET /share/{key}` is the only unauthenticated
//! read path in the API and is strictly read-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use manualcraft_core::access;
use manualcraft_core::credentials::generate_share_key;
use manualcraft_core::error::CoreError;
use manualcraft_core::types::{DbId, Timestamp};
use manualcraft_db::models::project::{ProjectDetail, ShareInfo};
use manualcraft_db::repositories::ShareRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{fetch_project, load_detail};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Share link lifetime.
const SHARE_EXPIRY_DAYS: i64 = 30;

/// The share routes register a single `{id}` segment; the management calls
/// expect a numeric project id there. Hex share keys never parse as one,
/// so a non-numeric segment cannot name a project.
fn parse_project_id(segment: &str) -> Result<DbId, AppError> {
    segment
        .parse()
        .map_err(|_| AppError::NotFound(format!("No project matches '{segment}'")))
}

/// Response for share link creation.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub share_key: String,
    pub share_url: String,
    pub expiry_date: Timestamp,
}

/// POST /api/v1/share/{project_id}
///
/// Generate (or regenerate) the share link. The previous key, if any,
/// stops resolving immediately.
pub async fn generate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<ShareResponse>)> {
    let project_id = parse_project_id(&id)?;
    let project = fetch_project(&state, project_id).await?;
    if !access::can_manage_share(&user.principal(), project.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner or an admin can share it".into(),
        )));
    }

    let share_key = generate_share_key();
    let expiry_date = Utc::now() + Duration::days(SHARE_EXPIRY_DAYS);
    let share = ShareRepo::upsert(&state.pool, project_id, &share_key, user.user_id, expiry_date)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShareResponse {
            share_url: format!("{}/share/{}", state.config.public_base_url, share.share_key),
            share_key: share.share_key,
            expiry_date: share.expiry_date,
        }),
    ))
}

/// DELETE /api/v1/share/{project_id}
pub async fn revoke(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let project_id = parse_project_id(&id)?;
    let project = fetch_project(&state, project_id).await?;
    if !access::can_manage_share(&user.principal(), project.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner or an admin can revoke sharing".into(),
        )));
    }

    let deleted = ShareRepo::delete_by_project(&state.pool, project_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Share link",
            id: project_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/share/{key}
///
/// Anonymous shared-project read. Expired or unknown keys are
/// indistinguishable from missing ones.
pub async fn get_shared(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<ProjectDetail>> {
    let share = ShareRepo::find_valid_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid or expired share link".into()))?;

    let mut detail = load_detail(&state, share.project_id).await?;
    detail.share = Some(ShareInfo {
        share_key: share.share_key,
        expiry_date: share.expiry_date,
    });
    Ok(Json(detail))
}
