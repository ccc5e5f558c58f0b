//! Handlers for the `/departments` resource.
//!
//! Reads are open to any authenticated user; writes are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use manualcraft_core::error::CoreError;
use manualcraft_core::types::DbId;
use manualcraft_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use manualcraft_db::models::task_type::TaskType;
use manualcraft_db::repositories::{DepartmentRepo, TaskTypeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/departments
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Department name is required".into(),
        )));
    }
    let department = DepartmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// GET /api/v1/departments
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Department>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(departments))
}

/// GET /api/v1/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Department>> {
    let department = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// GET /api/v1/departments/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<TaskType>>> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    let tasks = TaskTypeRepo::list_by_department(&state.pool, id).await?;
    Ok(Json(tasks))
}

/// PUT /api/v1/departments/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Department name must not be empty".into(),
            )));
        }
    }
    let department = DepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;
    Ok(Json(department))
}

/// DELETE /api/v1/departments/{id}
///
/// Task types cascade; users and projects block the delete.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id,
        }))?;

    let deps = DepartmentRepo::dependents(&state.pool, id).await?;
    if deps.user_count > 0 || deps.project_count > 0 {
        return Err(AppError::Core(CoreError::Referential(format!(
            "Department is still referenced by {} user(s) and {} project(s)",
            deps.user_count, deps.project_count
        ))));
    }

    DepartmentRepo::delete_cascade(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
