//! Repository for the `media_files` table and its timeline rows.

use manualcraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{MediaFile, NewMediaFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, file_name, file_path, file_type, file_size, duration, \
     created_by, created_at";

/// Provides operations for media files. Every media row carries a matching
/// timeline row, created and removed in the same transaction.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert a media file and its timeline row in one transaction.
    ///
    /// `timeline_end` is the probed duration for videos or the display
    /// default for images.
    pub async fn create_with_timeline(
        pool: &PgPool,
        input: &NewMediaFile,
        timeline_end: f64,
    ) -> Result<MediaFile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO media_files (project_id, file_name, file_path, file_type, file_size, duration, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let media = sqlx::query_as::<_, MediaFile>(&query)
            .bind(input.project_id)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(&input.file_type)
            .bind(input.file_size)
            .bind(input.duration)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO timeline (project_id, media_id, start_time, end_time)
             VALUES ($1, $2, 0, $3)",
        )
        .bind(media.project_id)
        .bind(media.id)
        .bind(timeline_end)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(media)
    }

    /// Find a media file by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_files WHERE id = $1");
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the media files of a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MediaFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_files WHERE project_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, MediaFile>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a media file and its timeline row in one transaction.
    ///
    /// Returns the row's file path so the caller can remove the blob, or
    /// `None` if no row with the given `id` exists.
    pub async fn delete_with_timeline(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM timeline WHERE media_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let file_path: Option<String> =
            sqlx::query_scalar("DELETE FROM media_files WHERE id = $1 RETURNING file_path")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(file_path)
    }
}
