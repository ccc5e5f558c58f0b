//! Handlers for the `/projects` resource.
//!
//! Listing is role-scoped; per-project access runs the pure decision
//! functions in `manualcraft_core::access` against the fetched row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use manualcraft_core::access::{self, ProjectRef};
use manualcraft_core::error::CoreError;
use manualcraft_core::status::is_valid_status;
use manualcraft_core::timeline::{self, TimelineItem};
use manualcraft_core::types::DbId;
use manualcraft_db::models::project::{
    CreateProject, Project, ProjectDetail, ProjectSummary, UpdateProject,
};
use manualcraft_db::repositories::{
    DepartmentRepo, ElementRepo, MediaRepo, ProjectRepo, TaskTypeRepo, TimelineRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage;

// ---------------------------------------------------------------------------
// Shared helpers (also used by the media / element / share / download handlers)
// ---------------------------------------------------------------------------

/// Fetch a project row or fail with 404.
pub(crate) async fn fetch_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// The access-control view of a project row.
pub(crate) fn project_ref(project: &Project) -> ProjectRef<'_> {
    ProjectRef {
        created_by: project.created_by,
        department_id: project.department_id,
        status: &project.status,
    }
}

/// Assemble the full detail payload for a project that has already passed
/// an access check.
pub(crate) async fn load_detail(
    state: &AppState,
    id: DbId,
) -> AppResult<ProjectDetail> {
    let summary = ProjectRepo::find_summary_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let media = MediaRepo::list_by_project(&state.pool, id).await?;
    let elements = ElementRepo::list_by_project(&state.pool, id).await?;
    let timeline = TimelineRepo::list_by_project(&state.pool, id).await?;

    Ok(ProjectDetail {
        project: summary,
        media,
        elements,
        timeline,
        share: None,
    })
}

async fn validate_references(state: &AppState, input: &UpdateProject) -> AppResult<()> {
    if let Some(status) = &input.status {
        if !is_valid_status(status) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown status: {status}"
            ))));
        }
    }
    if let Some(department_id) = input.department_id {
        DepartmentRepo::find_by_id(&state.pool, department_id)
            .await?
            .ok_or(AppError::Core(CoreError::Validation(format!(
                "Department {department_id} does not exist"
            ))))?;
    }
    if let Some(task_type_id) = input.task_type_id {
        TaskTypeRepo::find_by_id(&state.pool, task_type_id)
            .await?
            .ok_or(AppError::Core(CoreError::Validation(format!(
                "Task type {task_type_id} does not exist"
            ))))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project title is required".into(),
        )));
    }
    validate_references(
        &state,
        &UpdateProject {
            title: None,
            description: None,
            status: input.status.clone(),
            department_id: input.department_id,
            task_type_id: input.task_type_id,
        },
    )
    .await?;

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Admins see everything, editors their own plus their department's,
/// viewers published projects plus their own.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ProjectSummary>>> {
    let principal = user.principal();
    let projects = if principal.is_admin() {
        ProjectRepo::list_all(&state.pool).await?
    } else if principal.can_edit() {
        ProjectRepo::list_for_editor(&state.pool, user.user_id, user.department_id).await?
    } else {
        ProjectRepo::list_for_viewer(&state.pool, user.user_id).await?
    };
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
///
/// Returns the full editor payload: project plus media, elements, and
/// timeline rows.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = fetch_project(&state, id).await?;
    if !access::can_read_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    Ok(Json(load_detail(&state, id).await?))
}

/// A packed timeline entry in the layout response.
#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    pub id: DbId,
    pub start: f64,
    pub end: f64,
}

impl From<TimelineItem> for TimelineEntry {
    fn from(item: TimelineItem) -> Self {
        TimelineEntry {
            id: item.id,
            start: item.start,
            end: item.end,
        }
    }
}

/// Track-packed timeline layout for the editor.
#[derive(Debug, Serialize)]
pub struct TimelineLayoutResponse {
    pub media_track: Vec<TimelineEntry>,
    pub element_tracks: Vec<Vec<TimelineEntry>>,
}

/// GET /api/v1/projects/{id}/timeline
///
/// Lays out the project's timeline rows: media on a dedicated track,
/// elements greedily packed into as few tracks as their overlaps allow.
pub async fn get_timeline(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimelineLayoutResponse>> {
    let project = fetch_project(&state, id).await?;
    if !access::can_read_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }

    let rows = TimelineRepo::list_by_project(&state.pool, id).await?;
    let media: Vec<TimelineItem> = rows
        .iter()
        .filter(|r| r.media_id.is_some())
        .map(|r| TimelineItem::new(r.media_id.unwrap_or_default(), r.start_time, r.end_time))
        .collect();
    let elements: Vec<TimelineItem> = rows
        .iter()
        .filter(|r| r.element_id.is_some())
        .map(|r| TimelineItem::new(r.element_id.unwrap_or_default(), r.start_time, r.end_time))
        .collect();

    let layout = timeline::layout(&media, &elements);
    Ok(Json(TimelineLayoutResponse {
        media_track: layout.media_track.into_iter().map(Into::into).collect(),
        element_tracks: layout
            .element_tracks
            .into_iter()
            .map(|track| track.into_iter().map(Into::into).collect())
            .collect(),
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = fetch_project(&state, id).await?;
    if !access::can_modify_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner or an admin can modify it".into(),
        )));
    }
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Project title must not be empty".into(),
            )));
        }
    }
    validate_references(&state, &input).await?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades share links, timeline rows, elements, and media rows in one
/// transaction, then removes the blobs best-effort.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = fetch_project(&state, id).await?;
    if !access::can_modify_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner or an admin can delete it".into(),
        )));
    }

    let file_paths = ProjectRepo::delete_cascade(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    for path in &file_paths {
        storage::remove_blob(&state.config.upload_dir, path).await;
    }

    Ok(StatusCode::NO_CONTENT)
}
