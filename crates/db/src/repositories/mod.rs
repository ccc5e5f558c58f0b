//! Repository layer: zero-sized structs with async methods over a `PgPool`.
//!
//! Repositories stay close to the tables. Multi-table operations (cascade
//! deletes, element/timeline sync) run inside a transaction here; access
//! decisions live above this layer.

pub mod department_repo;
pub mod element_repo;
pub mod media_repo;
pub mod project_repo;
pub mod share_repo;
pub mod task_type_repo;
pub mod timeline_repo;
pub mod user_repo;

pub use department_repo::DepartmentRepo;
pub use element_repo::ElementRepo;
pub use media_repo::MediaRepo;
pub use project_repo::ProjectRepo;
pub use share_repo::ShareRepo;
pub use task_type_repo::TaskTypeRepo;
pub use timeline_repo::TimelineRepo;
pub use user_repo::UserRepo;
