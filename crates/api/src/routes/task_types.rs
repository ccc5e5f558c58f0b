//! Route definitions for the `/tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::task_types;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /      -> list (with department names)
/// POST   /      -> create (admin)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task_types::list).post(task_types::create))
        .route(
            "/{id}",
            get(task_types::get_by_id)
                .put(task_types::update)
                .delete(task_types::delete),
        )
}
