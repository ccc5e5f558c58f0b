//! HTTP route definitions.
//!
//! Each module wires one resource's paths to its handlers; `api_routes`
//! assembles the versioned tree that the router nests under `/api/v1`.
//! Health stays at the root so load balancers can probe it unversioned.

pub mod auth;
pub mod departments;
pub mod download;
pub mod elements;
pub mod health;
pub mod media;
pub mod projects;
pub mod share;
pub mod task_types;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All versioned API routes, to be nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/departments", departments::router())
        .nest("/tasks", task_types::router())
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/media", media::router())
        .nest("/elements", elements::router())
        .nest("/share", share::router())
        .nest("/download", download::router())
}
