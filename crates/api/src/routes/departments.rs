//! Route definitions for the `/departments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create (admin)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update (admin)
/// DELETE /{id}        -> delete (admin)
/// GET    /{id}/tasks  -> list_tasks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(departments::list).post(departments::create))
        .route(
            "/{id}",
            get(departments::get_by_id)
                .put(departments::update)
                .delete(departments::delete),
        )
        .route("/{id}/tasks", get(departments::list_tasks))
}
