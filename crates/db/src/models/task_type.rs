//! Task type entity model and DTOs.

use manualcraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task type row from the `task_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskType {
    pub id: DbId,
    pub department_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task type joined with its department's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskTypeWithDepartment {
    pub id: DbId,
    pub department_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub department_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskType {
    pub department_id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing task type.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskType {
    pub department_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
}
