//! Route definitions for share links.
//!
//! One `{id}` segment serves both surfaces: GET resolves a 32-char hex
//! share key, POST/DELETE manage a project's link by numeric id. The
//! router permits only one parameter name per path position, so the
//! management handlers parse the segment themselves.

use axum::routing::get;
use axum::Router;

use crate::handlers::share;
use crate::state::AppState;

/// Routes mounted at `/share`.
///
/// ```text
/// GET    /{id}  -> get_shared (public, read-only; id is a share key)
/// POST   /{id}  -> generate (owner or admin; id is a project id)
/// DELETE /{id}  -> revoke (owner or admin; id is a project id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(share::get_shared)
            .post(share::generate)
            .delete(share::revoke),
    )
}
