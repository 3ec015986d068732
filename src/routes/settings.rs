//! Admin settings routes — fetch and upsert-by-key of the flat map.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::routes::auth::AdminUser;
use crate::services::settings::{self, SettingsError};
use crate::state::AppState;

/// `GET /api/admin/settings` — the full key→value map.
pub async fn get_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<HashMap<String, String>>, StatusCode> {
    let map = settings::fetch_all(&state.pool).await.map_err(|err| {
        tracing::error!(error = %err, "settings fetch failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(map))
}

/// `PUT /api/admin/settings` — upsert every entry by key. Unknown keys are
/// rejected before any write.
pub async fn save_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(entries): Json<HashMap<String, String>>,
) -> Response {
    match settings::upsert_all(&state.pool, &entries).await {
        Ok(()) => Json(serde_json::json!({ "ok": true, "saved": entries.len() })).into_response(),
        Err(err @ SettingsError::UnknownKey(_)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": err.to_string() })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "settings upsert failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
