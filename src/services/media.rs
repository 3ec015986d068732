//! Media service — upload metadata and two-step deletion.
//!
//! ERROR HANDLING
//! ==============
//! Deletion is binary-first: the stored file is removed before the metadata
//! row, and a failed removal leaves the row intact. A dangling row pointing
//! at a missing binary is never created by this path.

use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::services::storage::{MediaStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media file not found: {0}")]
    NotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MediaRow {
    pub id: Uuid,
    /// Original filename as uploaded.
    pub name: String,
    /// Path inside the media store, kept so deletion never parses the URL.
    pub storage_path: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub created_at: OffsetDateTime,
}

fn row_to_media(r: &sqlx::postgres::PgRow) -> MediaRow {
    MediaRow {
        id: r.get("id"),
        name: r.get("name"),
        storage_path: r.get("storage_path"),
        url: r.get("url"),
        content_type: r.get("type"),
        size: r.get("size"),
        created_at: r.get("created_at"),
    }
}

const SELECT_COLUMNS: &str = "id, name, storage_path, url, type, size, created_at";

/// Full collection, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_media(pool: &PgPool) -> Result<Vec<MediaRow>, MediaError> {
    let rows = sqlx::query(&format!(
        "SELECT {SELECT_COLUMNS} FROM media ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_media).collect())
}

/// Record the metadata for bytes already written to the store.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn insert_record(
    pool: &PgPool,
    name: &str,
    storage_path: &str,
    url: &str,
    content_type: Option<&str>,
    size: i64,
) -> Result<MediaRow, MediaError> {
    let row = sqlx::query(&format!(
        "INSERT INTO media (name, storage_path, url, type, size)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {SELECT_COLUMNS}"
    ))
    .bind(name)
    .bind(storage_path)
    .bind(url)
    .bind(content_type)
    .bind(size)
    .fetch_one(pool)
    .await?;

    Ok(row_to_media(&row))
}

/// Store one upload: write the bytes, then record the pointer.
///
/// # Errors
///
/// A storage error leaves no metadata row; a database error after the write
/// leaves an orphaned binary (surfaced to the caller either way).
pub async fn store_upload(
    pool: &PgPool,
    store: &MediaStore,
    original_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<MediaRow, MediaError> {
    let path = MediaStore::generate_path(original_name);
    store.store(&path, bytes).await?;

    let url = MediaStore::public_url(&path);
    let size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
    insert_record(pool, original_name, &path, &url, content_type, size).await
}

/// Delete one media file: remove the binary first, then the metadata row.
///
/// # Errors
///
/// `NotFound` when no row matches; a storage failure aborts before the row
/// delete is issued.
pub async fn delete_media(pool: &PgPool, store: &MediaStore, id: Uuid) -> Result<(), MediaError> {
    let row = sqlx::query("SELECT storage_path FROM media WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(MediaError::NotFound(id))?;
    let storage_path: String = row.get("storage_path");

    delete_binary_then_row(pool, store, id, &storage_path).await
}

/// Binary first: a failed removal returns before the row delete is issued.
pub(crate) async fn delete_binary_then_row(
    pool: &PgPool,
    store: &MediaStore,
    id: Uuid,
    storage_path: &str,
) -> Result<(), MediaError> {
    store.remove(storage_path).await?;

    sqlx::query("DELETE FROM media WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
