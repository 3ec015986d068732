//! Service-catalog service — the editable offerings shown on the public site.
//!
//! DESIGN
//! ======
//! Display order is a plain integer assigned at creation as the current row
//! count; uniqueness is by convention only, the database does not enforce
//! it. Edits refresh `updated_at`; toggling visibility is just a partial
//! update of `is_active`.

use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("service not found: {0}")]
    NotFound(Uuid),
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Symbolic icon name resolved to a graphic at render time; unvalidated.
    pub icon: Option<String>,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields accepted by a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub is_active: Option<bool>,
}

fn row_to_service(r: &sqlx::postgres::PgRow) -> ServiceRow {
    ServiceRow {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        icon: r.get("icon"),
        order_index: r.get("order_index"),
        is_active: r.get("is_active"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

const SELECT_COLUMNS: &str = "id, title, description, icon, order_index, is_active, created_at, updated_at";

/// All rows, display order ascending.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_all(pool: &PgPool) -> Result<Vec<ServiceRow>, CatalogError> {
    let rows = sqlx::query(&format!(
        "SELECT {SELECT_COLUMNS} FROM services ORDER BY order_index ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_service).collect())
}

/// Active rows only, for the public listing.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_active(pool: &PgPool) -> Result<Vec<ServiceRow>, CatalogError> {
    let rows = sqlx::query(&format!(
        "SELECT {SELECT_COLUMNS} FROM services WHERE is_active ORDER BY order_index ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_service).collect())
}

/// Create a service. `order_index` is the current collection size, so new
/// entries append to the end of the display order.
///
/// # Errors
///
/// `EmptyTitle`, or a database error.
pub async fn create_service(
    pool: &PgPool,
    title: &str,
    description: Option<&str>,
    icon: Option<&str>,
    is_active: bool,
) -> Result<ServiceRow, CatalogError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CatalogError::EmptyTitle);
    }

    let order_index = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
        .fetch_one(pool)
        .await?;
    let order_index = i32::try_from(order_index).unwrap_or(i32::MAX);

    let row = sqlx::query(&format!(
        "INSERT INTO services (title, description, icon, order_index, is_active)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {SELECT_COLUMNS}"
    ))
    .bind(title)
    .bind(description)
    .bind(icon)
    .bind(order_index)
    .bind(is_active)
    .fetch_one(pool)
    .await?;

    Ok(row_to_service(&row))
}

/// Partial update; refreshes `updated_at` and returns the updated row.
///
/// # Errors
///
/// `NotFound`, `EmptyTitle`, or a database error.
pub async fn update_service(pool: &PgPool, id: Uuid, patch: &ServicePatch) -> Result<ServiceRow, CatalogError> {
    if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(CatalogError::EmptyTitle);
    }

    let row = sqlx::query(&format!(
        "UPDATE services SET
             title = COALESCE($2, title),
             description = CASE WHEN $3 THEN $4 ELSE description END,
             icon = CASE WHEN $5 THEN $6 ELSE icon END,
             is_active = COALESCE($7, is_active),
             updated_at = now()
         WHERE id = $1
         RETURNING {SELECT_COLUMNS}"
    ))
    .bind(id)
    .bind(patch.title.as_deref().map(str::trim))
    .bind(patch.description.is_some())
    .bind(patch.description.clone().flatten())
    .bind(patch.icon.is_some())
    .bind(patch.icon.clone().flatten())
    .bind(patch.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(CatalogError::NotFound(id))?;

    Ok(row_to_service(&row))
}

/// Delete a service.
///
/// # Errors
///
/// `NotFound` when no row matches, or a database error.
pub async fn delete_service(pool: &PgPool, id: Uuid) -> Result<(), CatalogError> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogError::NotFound(id));
    }
    Ok(())
}

/// Total service count, optionally narrowed to active rows.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn count_services(pool: &PgPool, active_only: bool) -> Result<i64, CatalogError> {
    let count = if active_only {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services WHERE is_active")
            .fetch_one(pool)
            .await?
    } else {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
            .fetch_one(pool)
            .await?
    };
    Ok(count)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
