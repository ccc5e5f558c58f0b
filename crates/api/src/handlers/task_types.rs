//! Handlers for the `/tasks` resource (task types).
//!
//! Reads are open to any authenticated user; writes are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use manualcraft_core::error::CoreError;
use manualcraft_core::types::DbId;
use manualcraft_db::models::task_type::{
    CreateTaskType, TaskType, TaskTypeWithDepartment, UpdateTaskType,
};
use manualcraft_db::repositories::{DepartmentRepo, TaskTypeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

async fn require_department(state: &AppState, id: DbId) -> AppResult<()> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Department {id} does not exist"
        ))))?;
    Ok(())
}

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateTaskType>,
) -> AppResult<(StatusCode, Json<TaskType>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task name is required".into(),
        )));
    }
    require_department(&state, input.department_id).await?;

    let task = TaskTypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<TaskTypeWithDepartment>>> {
    let tasks = TaskTypeRepo::list(&state.pool).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskType>> {
    let task = TaskTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task type",
            id,
        }))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskType>,
) -> AppResult<Json<TaskType>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Task name must not be empty".into(),
            )));
        }
    }
    if let Some(department_id) = input.department_id {
        require_department(&state, department_id).await?;
    }

    let task = TaskTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task type",
            id,
        }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    TaskTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task type",
            id,
        }))?;

    let project_count = TaskTypeRepo::project_count(&state.pool, id).await?;
    if project_count > 0 {
        return Err(AppError::Core(CoreError::Referential(format!(
            "Task type is still referenced by {project_count} project(s)"
        ))));
    }

    TaskTypeRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
