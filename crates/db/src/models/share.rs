//! Project share link model.

use manualcraft_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A share link row from the `project_shares` table. At most one per
/// project; regenerating replaces the key and resets the expiry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectShare {
    pub id: DbId,
    pub project_id: DbId,
    pub share_key: String,
    pub created_by: DbId,
    pub expiry_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
