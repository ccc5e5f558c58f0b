//! Route definitions for the `/elements` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::elements;
use crate::state::AppState;

/// Routes mounted at `/elements`.
///
/// ```text
/// GET    /?project_id=  -> list (stacking order)
/// POST   /              -> create (per-type defaults applied)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete (owner, creator, or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(elements::list).post(elements::create))
        .route(
            "/{id}",
            get(elements::get_by_id)
                .put(elements::update)
                .delete(elements::delete),
        )
}
