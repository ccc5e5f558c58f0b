//! Repository for the `elements` table and its timeline rows.

use manualcraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::element::{CreateElement, Element, UpdateElement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, element_type, position_x, position_y, width, height, \
     rotation, start_time, end_time, z_index, content, color, background, font_size, \
     border_width, border_color, fill_opacity, created_by, created_at";

/// Provides operations for overlay elements. Every element carries a
/// matching timeline row, kept in sync within the same transaction.
pub struct ElementRepo;

impl ElementRepo {
    /// Insert an element and its timeline row in one transaction.
    ///
    /// The caller resolves per-type defaults before this point; what is
    /// still `None` here lands as NULL (or the table default for position
    /// and time fields).
    pub async fn create_with_timeline(
        pool: &PgPool,
        project_id: DbId,
        created_by: DbId,
        input: &CreateElement,
    ) -> Result<Element, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO elements (project_id, element_type, position_x, position_y, width, height,
                rotation, start_time, end_time, z_index, content, color, background, font_size,
                border_width, border_color, fill_opacity, created_by)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), $5, $6, $7,
                COALESCE($8, 0), COALESCE($9, 10), COALESCE($10, 0),
                $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        );
        let element = sqlx::query_as::<_, Element>(&query)
            .bind(project_id)
            .bind(&input.element_type)
            .bind(input.position_x)
            .bind(input.position_y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.rotation)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.z_index)
            .bind(&input.content)
            .bind(&input.color)
            .bind(&input.background)
            .bind(input.font_size)
            .bind(input.border_width)
            .bind(&input.border_color)
            .bind(input.fill_opacity)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO timeline (project_id, element_id, start_time, end_time)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(element.project_id)
        .bind(element.id)
        .bind(element.start_time)
        .bind(element.end_time)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(element)
    }

    /// Find an element by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Element>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM elements WHERE id = $1");
        sqlx::query_as::<_, Element>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the elements of a project in stacking order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Element>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM elements WHERE project_id = $1
             ORDER BY z_index ASC, created_at ASC"
        );
        sqlx::query_as::<_, Element>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update an element and re-sync its timeline row in one transaction.
    /// Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_with_timeline(
        pool: &PgPool,
        id: DbId,
        input: &UpdateElement,
    ) -> Result<Option<Element>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE elements SET
                position_x = COALESCE($2, position_x),
                position_y = COALESCE($3, position_y),
                width = COALESCE($4, width),
                height = COALESCE($5, height),
                rotation = COALESCE($6, rotation),
                start_time = COALESCE($7, start_time),
                end_time = COALESCE($8, end_time),
                z_index = COALESCE($9, z_index),
                content = COALESCE($10, content),
                color = COALESCE($11, color),
                background = COALESCE($12, background),
                font_size = COALESCE($13, font_size),
                border_width = COALESCE($14, border_width),
                border_color = COALESCE($15, border_color),
                fill_opacity = COALESCE($16, fill_opacity)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let element = sqlx::query_as::<_, Element>(&query)
            .bind(id)
            .bind(input.position_x)
            .bind(input.position_y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.rotation)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.z_index)
            .bind(&input.content)
            .bind(&input.color)
            .bind(&input.background)
            .bind(input.font_size)
            .bind(input.border_width)
            .bind(&input.border_color)
            .bind(input.fill_opacity)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(element) = &element {
            sqlx::query(
                "UPDATE timeline SET start_time = $2, end_time = $3 WHERE element_id = $1",
            )
            .bind(element.id)
            .bind(element.start_time)
            .bind(element.end_time)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(element)
    }

    /// Delete an element and its timeline row in one transaction.
    /// Returns `true` if a row was removed.
    pub async fn delete_with_timeline(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM timeline WHERE element_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM elements WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
