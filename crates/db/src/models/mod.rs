//! Typed row models and request DTOs, one module per entity family.

pub mod department;
pub mod element;
pub mod media;
pub mod project;
pub mod share;
pub mod task_type;
pub mod timeline;
pub mod user;
