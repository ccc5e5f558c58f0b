//! User entity model and DTOs.

use manualcraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// The password hash is never serialized into API responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub department_id: Option<DbId>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user joined with their department's display name, for admin listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWithDepartment {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub department_id: Option<DbId>,
    pub department_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user (admin path). When `password` is omitted a
/// random one is generated and returned once in the create response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub department_id: Option<DbId>,
    /// Defaults to `viewer` if omitted.
    pub role: Option<String>,
}

/// DTO for updating an existing user. All fields are optional; immutable
/// fields (id, created_at) are not accepted at all.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub department_id: Option<DbId>,
    pub role: Option<String>,
}
