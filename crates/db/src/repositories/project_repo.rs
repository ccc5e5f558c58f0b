//! Repository for the `projects` table.

use manualcraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, department_id, task_type_id, created_by, \
     created_at, updated_at";

/// Column list for the joined listing variant.
const SUMMARY_COLUMNS: &str = "p.id, p.title, p.description, p.status, p.department_id, \
     p.task_type_id, p.created_by, d.name AS department_name, t.name AS task_name, \
     u.username AS creator_name, p.created_at, p.updated_at";

const SUMMARY_JOINS: &str = "FROM projects p
     LEFT JOIN departments d ON d.id = p.department_id
     LEFT JOIN task_types t ON t.id = p.task_type_id
     LEFT JOIN users u ON u.id = p.created_by";

/// Provides CRUD operations for projects, including role-scoped listings
/// and the full cascade delete.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `draft`.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description, status, department_id, task_type_id, created_by)
             VALUES ($1, $2, COALESCE($3, 'draft'), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.department_id)
            .bind(input.task_type_id)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project with display names joined in.
    pub async fn find_summary_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} {SUMMARY_JOINS} WHERE p.id = $1");
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every project, most recently created first. The admin view.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} {SUMMARY_JOINS} ORDER BY p.created_at DESC");
        sqlx::query_as::<_, ProjectSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// List projects visible to an editor: their own plus their department's.
    /// An editor without a department sees only their own.
    pub async fn list_for_editor(
        pool: &PgPool,
        user_id: DbId,
        department_id: Option<DbId>,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} {SUMMARY_JOINS}
             WHERE p.created_by = $1 OR ($2::BIGINT IS NOT NULL AND p.department_id = $2)
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(user_id)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// List projects visible to a viewer: published ones plus their own.
    pub async fn list_for_viewer(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} {SUMMARY_JOINS}
             WHERE p.status = 'published' OR p.created_by = $1
             ORDER BY p.created_at DESC"
        );
        sqlx::query_as::<_, ProjectSummary>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                department_id = COALESCE($5, department_id),
                task_type_id = COALESCE($6, task_type_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.department_id)
            .bind(input.task_type_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and everything under it in one transaction:
    /// share links, timeline rows, elements, and media rows.
    ///
    /// Returns the file paths of the deleted media rows so the caller can
    /// remove the blobs afterwards, or `None` if the project did not exist.
    /// Blob removal happens after commit; a crash in between leaks files on
    /// disk rather than leaving dangling rows.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_shares WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM timeline WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM elements WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let file_paths: Vec<String> = sqlx::query_scalar(
            "DELETE FROM media_files WHERE project_id = $1 RETURNING file_path",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        if result.rows_affected() > 0 {
            Ok(Some(file_paths))
        } else {
            Ok(None)
        }
    }
}
