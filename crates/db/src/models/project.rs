//! Project entity model and DTOs.

use manualcraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::element::Element;
use crate::models::media::MediaFile;
use crate::models::timeline::TimelineRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub department_id: Option<DbId>,
    pub task_type_id: Option<DbId>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with display names for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub department_id: Option<DbId>,
    pub task_type_id: Option<DbId>,
    pub created_by: DbId,
    pub department_name: Option<String>,
    pub task_name: Option<String>,
    pub creator_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The full editor/export payload: project plus its media, elements, and
/// timeline rows. `share` is populated only on the anonymous share-read path.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectSummary,
    pub media: Vec<MediaFile>,
    pub elements: Vec<Element>,
    pub timeline: Vec<TimelineRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<ShareInfo>,
}

/// Share metadata attached to a shared project payload.
#[derive(Debug, Clone, Serialize)]
pub struct ShareInfo {
    pub share_key: String,
    pub expiry_date: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub department_id: Option<DbId>,
    pub task_type_id: Option<DbId>,
}

/// DTO for updating an existing project. All fields are optional; immutable
/// fields (id, created_by, created_at) are not accepted at all.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub department_id: Option<DbId>,
    pub task_type_id: Option<DbId>,
}
