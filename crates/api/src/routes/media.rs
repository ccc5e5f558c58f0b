//! Route definitions for the `/media` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET    /?project_id=  -> list
/// POST   /              -> upload (multipart: project_id + file)
/// GET    /{id}          -> get_by_id
/// DELETE /{id}          -> delete (owner, uploader, or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list).post(media::upload))
        .route("/{id}", get(media::get_by_id).delete(media::delete))
}
