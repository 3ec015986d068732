//! Admin service-catalog routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AdminUser;
use crate::services::catalog::{self, ServicePatch, ServiceRow};
use crate::state::AppState;

pub(crate) fn catalog_error_to_status(err: &catalog::CatalogError) -> StatusCode {
    match err {
        catalog::CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        catalog::CatalogError::EmptyTitle => StatusCode::UNPROCESSABLE_ENTITY,
        catalog::CatalogError::Database(inner) => {
            tracing::error!(error = %inner, "catalog database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/admin/services` — all rows, display order ascending.
pub async fn list_services(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<ServiceRow>>, StatusCode> {
    let rows = catalog::list_all(&state.pool)
        .await
        .map_err(|err| catalog_error_to_status(&err))?;
    Ok(Json(rows))
}

#[derive(Deserialize)]
pub struct CreateServiceBody {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// `POST /api/admin/services` — create; order_index appends to the end.
pub async fn create_service(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<CreateServiceBody>,
) -> Result<(StatusCode, Json<ServiceRow>), StatusCode> {
    let row = catalog::create_service(
        &state.pool,
        &body.title,
        body.description.as_deref(),
        body.icon.as_deref(),
        body.is_active,
    )
    .await
    .map_err(|err| catalog_error_to_status(&err))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Body fields map onto `ServicePatch`: a present-but-null `description`
/// or `icon` clears the column, an absent one leaves it untouched.
#[derive(Deserialize)]
pub struct UpdateServiceBody {
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub icon: Option<Option<String>>,
    pub is_active: Option<bool>,
}

mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

/// `PATCH /api/admin/services/:id` — partial update, returns the new row.
pub async fn update_service(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateServiceBody>,
) -> Result<Json<ServiceRow>, StatusCode> {
    let patch = ServicePatch {
        title: body.title,
        description: body.description,
        icon: body.icon,
        is_active: body.is_active,
    };
    let row = catalog::update_service(&state.pool, id, &patch)
        .await
        .map_err(|err| catalog_error_to_status(&err))?;
    Ok(Json(row))
}

/// `DELETE /api/admin/services/:id` — remove one offering.
pub async fn delete_service(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    catalog::delete_service(&state.pool, id)
        .await
        .map_err(|err| catalog_error_to_status(&err))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
#[path = "services_test.rs"]
mod tests;
