//! Project status constants.
//!
//! These must match the CHECK constraint on `projects.status` in
//! `0001_create_schema.sql`.

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_ARCHIVED: &str = "archived";

/// All valid project statuses, used when validating project input.
pub const ALL_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED, STATUS_ARCHIVED];

/// Whether the status is one of the three known statuses.
pub fn is_valid_status(status: &str) -> bool {
    ALL_STATUSES.contains(&status)
}
