//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `0001_create_schema.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// All valid role names, used when validating user create/update input.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER];

/// Whether the role name is one of the three known roles.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
