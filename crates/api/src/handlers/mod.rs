//! HTTP handlers, one module per resource.

pub mod auth;
pub mod departments;
pub mod download;
pub mod elements;
pub mod media;
pub mod projects;
pub mod share;
pub mod task_types;
pub mod users;
