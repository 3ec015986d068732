//! Admin media routes — listing, multipart upload, two-step deletion.
//!
//! ERROR HANDLING
//! ==============
//! A multi-file batch is processed strictly sequentially; the first failure
//! aborts the loop and surfaces one error. Files already stored in the same
//! batch stay committed — there is no compensating rollback; the caller
//! re-lists to see what landed.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use crate::routes::auth::AdminUser;
use crate::services::media::{self, MediaRow};
use crate::state::AppState;

pub(crate) fn media_error_to_status(err: &media::MediaError) -> StatusCode {
    match err {
        media::MediaError::NotFound(_) => StatusCode::NOT_FOUND,
        media::MediaError::Storage(inner) => {
            tracing::error!(error = %inner, "media storage error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        media::MediaError::Database(inner) => {
            tracing::error!(error = %inner, "media database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/admin/media` — full collection, newest first.
pub async fn list_media(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<MediaRow>>, StatusCode> {
    let rows = media::list_media(&state.pool)
        .await
        .map_err(|err| media_error_to_status(&err))?;
    Ok(Json(rows))
}

/// `POST /api/admin/media` — multipart upload, one or more files.
pub async fn upload_media(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<MediaRow>>), StatusCode> {
    let mut created = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let Some(original_name) = field.file_name().map(str::to_owned) else {
            // Non-file form fields are skipped.
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;

        let row = media::store_upload(
            &state.pool,
            &state.media,
            &original_name,
            content_type.as_deref(),
            &bytes,
        )
        .await
        .map_err(|err| media_error_to_status(&err))?;
        created.push(row);
    }

    if created.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /api/admin/media/:id` — binary first, then the metadata row.
pub async fn delete_media(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    media::delete_media(&state.pool, &state.media, id)
        .await
        .map_err(|err| media_error_to_status(&err))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
