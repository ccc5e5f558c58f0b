//! Timeline row model.

use manualcraft_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `timeline` table. Exactly one of `media_id` / `element_id`
/// is set, enforced by a table constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineRow {
    pub id: DbId,
    pub project_id: DbId,
    pub media_id: Option<DbId>,
    pub element_id: Option<DbId>,
    pub start_time: f64,
    pub end_time: f64,
}
