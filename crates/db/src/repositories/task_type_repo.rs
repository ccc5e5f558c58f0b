//! Repository for the `task_types` table.

use manualcraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::task_type::{CreateTaskType, TaskType, TaskTypeWithDepartment, UpdateTaskType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, department_id, name, description, created_at, updated_at";

/// Column list for the department-joined variant.
const JOINED_COLUMNS: &str = "t.id, t.department_id, t.name, t.description, \
     d.name AS department_name, t.created_at, t.updated_at";

/// Provides CRUD operations for task types.
pub struct TaskTypeRepo;

impl TaskTypeRepo {
    /// Insert a new task type, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTaskType) -> Result<TaskType, sqlx::Error> {
        let query = format!(
            "INSERT INTO task_types (department_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskType>(&query)
            .bind(input.department_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a task type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TaskType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_types WHERE id = $1");
        sqlx::query_as::<_, TaskType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all task types with their department names, ordered by
    /// department then task name.
    pub async fn list(pool: &PgPool) -> Result<Vec<TaskTypeWithDepartment>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM task_types t
             JOIN departments d ON d.id = t.department_id
             ORDER BY d.name ASC, t.name ASC"
        );
        sqlx::query_as::<_, TaskTypeWithDepartment>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the task types belonging to one department, ordered by name.
    pub async fn list_by_department(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<TaskType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM task_types WHERE department_id = $1 ORDER BY name ASC");
        sqlx::query_as::<_, TaskType>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task type. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTaskType,
    ) -> Result<Option<TaskType>, sqlx::Error> {
        let query = format!(
            "UPDATE task_types SET
                department_id = COALESCE($2, department_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskType>(&query)
            .bind(id)
            .bind(input.department_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Count projects referencing a task type. The caller rejects deletion
    /// while this is non-zero.
    pub async fn project_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE task_type_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a task type by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
