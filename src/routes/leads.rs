//! Admin lead routes — listing with in-memory filtering, status workflow,
//! deletion, and CSV export of the filtered list.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::AdminUser;
use crate::services::lead::{self, LeadRow, LeadStatus};
use crate::state::AppState;

pub(crate) fn lead_error_to_status(err: &lead::LeadError) -> StatusCode {
    match err {
        lead::LeadError::NotFound(_) => StatusCode::NOT_FOUND,
        lead::LeadError::Database(inner) => {
            tracing::error!(error = %inner, "lead database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Filter parameters shared by the list and export endpoints. `status`
/// absent, empty, or `"all"` means no status narrowing.
#[derive(Deserialize, Default)]
pub struct LeadFilter {
    #[serde(default)]
    pub q: String,
    pub status: Option<String>,
}

/// Resolve the status filter; `Err` marks an unknown status value.
pub(crate) fn parse_status_filter(raw: Option<&str>) -> Result<Option<LeadStatus>, StatusCode> {
    match raw {
        None | Some("" | "all") => Ok(None),
        Some(value) => LeadStatus::from_str(value)
            .map(Some)
            .ok_or(StatusCode::BAD_REQUEST),
    }
}

async fn fetch_filtered(state: &AppState, filter: &LeadFilter) -> Result<Vec<LeadRow>, StatusCode> {
    let status = parse_status_filter(filter.status.as_deref())?;
    let all = lead::list_leads(&state.pool)
        .await
        .map_err(|err| lead_error_to_status(&err))?;
    Ok(lead::filter_leads(all, &filter.q, status))
}

/// `GET /api/admin/leads` — full fetch, then the in-memory filter pass.
pub async fn list_leads(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filter): Query<LeadFilter>,
) -> Result<Json<Vec<LeadRow>>, StatusCode> {
    Ok(Json(fetch_filtered(&state, &filter).await?))
}

#[derive(Deserialize)]
pub struct UpdateLeadBody {
    pub status: String,
}

/// `PATCH /api/admin/leads/:id` — update one lead's status.
pub async fn update_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateLeadBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let status = LeadStatus::from_str(&body.status).ok_or(StatusCode::BAD_REQUEST)?;
    lead::update_status(&state.pool, id, status)
        .await
        .map_err(|err| lead_error_to_status(&err))?;
    Ok(Json(serde_json::json!({ "ok": true, "status": status })))
}

/// `DELETE /api/admin/leads/:id` — delete one lead.
pub async fn delete_lead(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    lead::delete_lead(&state.pool, id)
        .await
        .map_err(|err| lead_error_to_status(&err))?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/admin/leads/export.csv` — download the currently filtered
/// list as CSV, one header row plus one quoted row per lead.
pub async fn export_csv(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filter): Query<LeadFilter>,
) -> Result<Response, StatusCode> {
    let rows = fetch_filtered(&state, &filter).await?;
    let csv = lead::export_csv(&rows);
    let filename = lead::export_filename(time::OffsetDateTime::now_utc().date());

    let stream =
        futures::stream::once(async move { Ok::<axum::body::Bytes, std::convert::Infallible>(axum::body::Bytes::from(csv)) });
    let body = axum::body::Body::from_stream(stream);

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, &format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
#[path = "leads_test.rs"]
mod tests;
