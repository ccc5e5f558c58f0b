//! Handlers for the `/elements` resource.
//!
//! Creation validates the element type and fills per-type defaults; every
//! element carries a timeline row kept in sync by the repository.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use manualcraft_core::access;
use manualcraft_core::element::{defaults_for, DEFAULT_END_TIME, DEFAULT_START_TIME};
use manualcraft_core::error::CoreError;
use manualcraft_core::types::DbId;
use manualcraft_db::models::element::{CreateElement, Element, UpdateElement};
use manualcraft_db::repositories::ElementRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::projects::{fetch_project, project_ref};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /elements`.
#[derive(Debug, Deserialize)]
pub struct CreateElementRequest {
    pub project_id: DbId,
    #[serde(flatten)]
    pub element: CreateElement,
}

/// Query parameters for `GET /elements`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub project_id: DbId,
}

fn require_valid_window(start: f64, end: f64) -> AppResult<()> {
    if !start.is_finite() || !end.is_finite() || start < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Element timing must be non-negative and finite".into(),
        )));
    }
    if end < start {
        return Err(AppError::Core(CoreError::Validation(
            "Element end time must not precede its start time".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/elements
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateElementRequest>,
) -> AppResult<(StatusCode, Json<Element>)> {
    let project = fetch_project(&state, input.project_id).await?;
    if !access::can_add_content(&user.principal(), project.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot add elements to this project".into(),
        )));
    }

    let mut element = input.element;
    let defaults = defaults_for(&element.element_type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown element type: {}",
            element.element_type
        )))
    })?;

    // Per-type defaults fill only what the client omitted.
    element.width = element.width.or(defaults.width);
    element.height = element.height.or(defaults.height);
    element.content = element
        .content
        .or_else(|| defaults.content.map(String::from));
    element.color = element.color.or_else(|| defaults.color.map(String::from));
    element.background = element
        .background
        .or_else(|| defaults.background.map(String::from));
    element.font_size = element.font_size.or(defaults.font_size);

    let start = element.start_time.unwrap_or(DEFAULT_START_TIME);
    let end = element.end_time.unwrap_or(DEFAULT_END_TIME);
    require_valid_window(start, end)?;
    element.start_time = Some(start);
    element.end_time = Some(end);

    let element =
        ElementRepo::create_with_timeline(&state.pool, input.project_id, user.user_id, &element)
            .await?;
    Ok((StatusCode::CREATED, Json(element)))
}

/// GET /api/v1/elements?project_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Element>>> {
    let project = fetch_project(&state, params.project_id).await?;
    if !access::can_read_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    let elements = ElementRepo::list_by_project(&state.pool, params.project_id).await?;
    Ok(Json(elements))
}

/// GET /api/v1/elements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Element>> {
    let element = ElementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Element",
            id,
        }))?;
    let project = fetch_project(&state, element.project_id).await?;
    if !access::can_read_project(&user.principal(), project_ref(&project)) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    Ok(Json(element))
}

/// PUT /api/v1/elements/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateElement>,
) -> AppResult<Json<Element>> {
    let element = ElementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Element",
            id,
        }))?;
    let project = fetch_project(&state, element.project_id).await?;
    if !access::can_update_content(&user.principal(), project.created_by, element.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot modify this element".into(),
        )));
    }

    // Validate the window the row will end up with, merging the partial
    // update over the current values.
    let start = input.start_time.unwrap_or(element.start_time);
    let end = input.end_time.unwrap_or(element.end_time);
    require_valid_window(start, end)?;

    let element = ElementRepo::update_with_timeline(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Element",
            id,
        }))?;
    Ok(Json(element))
}

/// DELETE /api/v1/elements/{id}
///
/// Delete is stricter than update: project owner, element creator, or admin.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let element = ElementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Element",
            id,
        }))?;
    let project = fetch_project(&state, element.project_id).await?;
    if !access::can_delete_content(&user.principal(), project.created_by, element.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete this element".into(),
        )));
    }

    ElementRepo::delete_with_timeline(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
