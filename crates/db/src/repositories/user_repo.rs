//! Repository for the `users` table.

use manualcraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{User, UserWithDepartment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, full_name, department_id, role, \
     created_at, updated_at";

/// Column list for the department-joined variant. Excludes the hash.
const JOINED_COLUMNS: &str = "u.id, u.username, u.email, u.full_name, u.department_id, \
     d.name AS department_name, u.role, u.created_at, u.updated_at";

/// Insert payload for a user. Built server-side after the password has been
/// hashed, never deserialized from a request body.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub department_id: Option<DbId>,
    pub role: String,
}

/// Field-level changes for a user. `password_hash` is already hashed when
/// present; `department_id` uses a double-Option so `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub department_id: Option<Option<DbId>>,
    pub role: Option<String>,
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, full_name, department_id, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(input.department_id)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive). The login path.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users with department names, ordered by username.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserWithDepartment>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM users u
             LEFT JOIN departments d ON d.id = u.department_id
             ORDER BY u.username ASC"
        );
        sqlx::query_as::<_, UserWithDepartment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count users with the admin role.
    pub async fn count_admins(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
            .fetch_one(pool)
            .await
    }

    /// Count all users. Used by the startup bootstrap check.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Apply field-level changes to a user. Only non-`None` fields in
    /// `changes` are applied; `department_id` may be cleared explicitly.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UserChanges,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                full_name = COALESCE($5, full_name),
                department_id = CASE WHEN $6 THEN $7 ELSE department_id END,
                role = COALESCE($8, role),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&changes.username)
            .bind(&changes.email)
            .bind(&changes.password_hash)
            .bind(&changes.full_name)
            .bind(changes.department_id.is_some())
            .bind(changes.department_id.flatten())
            .bind(&changes.role)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user unless they are the last remaining admin.
    ///
    /// The guard runs inside the statement itself, so two concurrent deletes
    /// cannot both succeed against the final admin. Returns `true` if a row
    /// was removed; the caller distinguishes "missing" from "guarded" by
    /// fetching the user first.
    pub async fn delete_guarded(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM users
             WHERE id = $1
               AND (role <> 'admin'
                    OR (SELECT COUNT(*) FROM users WHERE role = 'admin') > 1)",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count projects created by a user. The caller rejects deletion while
    /// this is non-zero.
    pub async fn project_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE created_by = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Count media files, elements, and share links authored by a user.
    /// Each carries a `created_by` FK, so any of them blocks deletion even
    /// when the enclosing project belongs to someone else.
    pub async fn authored_content_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM media_files WHERE created_by = $1)
                  + (SELECT COUNT(*) FROM elements WHERE created_by = $1)
                  + (SELECT COUNT(*) FROM project_shares WHERE created_by = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
