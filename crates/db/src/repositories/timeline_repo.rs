//! Repository for the `timeline` table.
//!
//! Timeline rows are written by [`crate::repositories::MediaRepo`] and
//! [`crate::repositories::ElementRepo`] alongside their owning entities;
//! this repo only reads them back.

use manualcraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::timeline::TimelineRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, media_id, element_id, start_time, end_time";

/// Provides read operations for timeline rows.
pub struct TimelineRepo;

impl TimelineRepo {
    /// List the timeline rows of a project ordered by start time.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TimelineRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timeline WHERE project_id = $1
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, TimelineRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
