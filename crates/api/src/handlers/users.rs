//! Handlers for the `/users` resource. All routes are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use manualcraft_core::credentials::{generate_password, GENERATED_PASSWORD_LEN};
use manualcraft_core::error::CoreError;
use manualcraft_core::roles::{is_valid_role, ROLE_ADMIN, ROLE_VIEWER};
use manualcraft_core::types::DbId;
use manualcraft_db::models::user::{CreateUser, UpdateUser, User, UserWithDepartment};
use manualcraft_db::repositories::user_repo::{NewUser, UserChanges};
use manualcraft_db::repositories::{DepartmentRepo, UserRepo};
use serde::Serialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Response for user creation. The generated password is returned exactly
/// once, when the admin did not supply one.
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    #[serde(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_password: Option<String>,
}

async fn require_department(state: &AppState, id: DbId) -> AppResult<()> {
    DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::Validation(format!(
            "Department {id} does not exist"
        ))))?;
    Ok(())
}

fn require_valid_role(role: &str) -> AppResult<()> {
    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))));
    }
    Ok(())
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username is required".into(),
        )));
    }
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }
    let role = input.role.unwrap_or_else(|| ROLE_VIEWER.to_string());
    require_valid_role(&role)?;
    if let Some(department_id) = input.department_id {
        require_department(&state, department_id).await?;
    }

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let (password, generated_password) = match input.password {
        Some(p) => {
            validate_password_strength(&p).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            (p, None)
        }
        None => {
            let p = generate_password(GENERATED_PASSWORD_LEN);
            (p.clone(), Some(p))
        }
    };
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &NewUser {
            username: input.username,
            email: input.email,
            password_hash,
            full_name: input.full_name,
            department_id: input.department_id,
            role,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user,
            generated_password,
        }),
    ))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserWithDepartment>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let existing = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if let Some(role) = &input.role {
        require_valid_role(role)?;
        // Demoting the last admin would leave no one able to administer.
        if existing.role == ROLE_ADMIN
            && role != ROLE_ADMIN
            && UserRepo::count_admins(&state.pool).await? <= 1
        {
            return Err(AppError::Core(CoreError::BusinessRule(
                "Cannot demote the last remaining admin".into(),
            )));
        }
    }
    if let Some(department_id) = input.department_id {
        require_department(&state, department_id).await?;
    }

    let password_hash = match input.password {
        Some(p) => {
            validate_password_strength(&p).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(&p)
                    .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))?,
            )
        }
        None => None,
    };

    let changes = UserChanges {
        username: input.username,
        email: input.email,
        password_hash,
        full_name: input.full_name,
        department_id: input.department_id.map(Some),
        role: input.role,
    };

    let user = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
///
/// Deleting the last remaining admin is rejected; the guard also runs
/// inside the delete statement so concurrent deletes cannot slip past.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let project_count = UserRepo::project_count(&state.pool, id).await?;
    if project_count > 0 {
        return Err(AppError::Core(CoreError::Referential(format!(
            "User still owns {project_count} project(s)"
        ))));
    }

    let content_count = UserRepo::authored_content_count(&state.pool, id).await?;
    if content_count > 0 {
        return Err(AppError::Core(CoreError::Referential(format!(
            "User still authored {content_count} media file(s), element(s), or share link(s)"
        ))));
    }

    let deleted = UserRepo::delete_guarded(&state.pool, id).await?;
    if !deleted {
        if user.role == ROLE_ADMIN {
            return Err(AppError::Core(CoreError::BusinessRule(
                "Cannot delete the last remaining admin".into(),
            )));
        }
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
