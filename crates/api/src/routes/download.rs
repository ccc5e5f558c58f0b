//! Route definition for the project export download.

use axum::routing::get;
use axum::Router;

use crate::handlers::download;
use crate::state::AppState;

/// Routes mounted at `/download`.
///
/// ```text
/// GET /{project_id}?shared_key=  -> download (session OR share key)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{project_id}", get(download::download))
}
