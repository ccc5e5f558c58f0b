//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /               -> list (role-scoped)
/// POST   /               -> create
/// GET    /{id}           -> get_by_id (full detail payload)
/// PUT    /{id}           -> update (owner or admin)
/// DELETE /{id}           -> delete (owner or admin, cascades)
/// GET    /{id}/timeline  -> get_timeline (track-packed layout)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/timeline", get(projects::get_timeline))
}
