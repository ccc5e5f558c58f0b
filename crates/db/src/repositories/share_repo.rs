//! Repository for the `project_shares` table.

use manualcraft_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::share::ProjectShare;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, share_key, created_by, expiry_date, created_at, updated_at";

/// Provides operations for project share links.
pub struct ShareRepo;

impl ShareRepo {
    /// Create or replace the share link for a project. Regenerating
    /// overwrites the key and expiry in place, so the previous key stops
    /// resolving immediately.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        share_key: &str,
        created_by: DbId,
        expiry_date: Timestamp,
    ) -> Result<ProjectShare, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_shares (project_id, share_key, created_by, expiry_date)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (project_id) DO UPDATE SET
                share_key = EXCLUDED.share_key,
                created_by = EXCLUDED.created_by,
                expiry_date = EXCLUDED.expiry_date,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectShare>(&query)
            .bind(project_id)
            .bind(share_key)
            .bind(created_by)
            .bind(expiry_date)
            .fetch_one(pool)
            .await
    }

    /// Find the share link of a project, expired or not.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<ProjectShare>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_shares WHERE project_id = $1");
        sqlx::query_as::<_, ProjectShare>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a share key to its row, ignoring expired links. The
    /// anonymous read path.
    pub async fn find_valid_by_key(
        pool: &PgPool,
        share_key: &str,
    ) -> Result<Option<ProjectShare>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_shares WHERE share_key = $1 AND expiry_date > NOW()"
        );
        sqlx::query_as::<_, ProjectShare>(&query)
            .bind(share_key)
            .fetch_optional(pool)
            .await
    }

    /// Revoke the share link of a project. Returns `true` if a row was removed.
    pub async fn delete_by_project(pool: &PgPool, project_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_shares WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
