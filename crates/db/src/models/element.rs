//! Overlay element entity model and DTOs.

use manualcraft_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An overlay element row from the `elements` table.
///
/// Position is in percent of the media container; width and height are in
/// pixels with `None` meaning size-to-content. Styling columns are sparse:
/// each element type fills only the subset that applies to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Element {
    pub id: DbId,
    pub project_id: DbId,
    pub element_type: String,
    pub position_x: f64,
    pub position_y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub start_time: f64,
    pub end_time: f64,
    pub z_index: i32,
    pub content: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub font_size: Option<i32>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub fill_opacity: Option<f64>,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating an element. Everything except the type is optional;
/// per-type defaults fill in the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateElement {
    pub element_type: String,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub z_index: Option<i32>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub font_size: Option<i32>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub fill_opacity: Option<f64>,
}

/// DTO for updating an element. All fields optional; immutable fields
/// (id, project_id, element_type, created_by, created_at) are not accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateElement {
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub z_index: Option<i32>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub font_size: Option<i32>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub fill_opacity: Option<f64>,
}
