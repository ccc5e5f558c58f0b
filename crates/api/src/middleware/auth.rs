//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use manualcraft_core::access::Principal;
use manualcraft_core::error::CoreError;
use manualcraft_core::types::DbId;
use manualcraft_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// The token only carries the user id; the live user row is loaded on every
/// request so role and department changes apply immediately. A token whose
/// user has been deleted is rejected.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::debug!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
    /// The user's role name (`"admin"`, `"editor"`, `"viewer"`).
    pub role: String,
    pub department_id: Option<DbId>,
}

impl AuthUser {
    /// The access-control view of this user.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            role: self.role.clone(),
            department_id: self.department_id,
        }
    }
}

/// Authenticate a request from its headers.
///
/// Shared by the [`AuthUser`] extractor and handlers that accept either a
/// session or a share key (the download path).
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
        role: user.role,
        department_id: user.department_id,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).await
    }
}
