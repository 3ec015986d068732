//! Admin dashboard route — headline counts and the recent-leads feed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use crate::routes::auth::AdminUser;
use crate::services::catalog;
use crate::services::lead::{self, LeadRow, LeadStatus};
use crate::state::AppState;

const RECENT_LEADS_LIMIT: i64 = 5;

#[derive(Serialize)]
pub struct DashboardStats {
    pub total_leads: i64,
    pub new_leads: i64,
    pub total_services: i64,
    pub active_services: i64,
    pub recent_leads: Vec<LeadRow>,
}

/// `GET /api/admin/dashboard` — stat cards plus the five newest leads.
pub async fn stats(State(state): State<AppState>, _admin: AdminUser) -> Result<Json<DashboardStats>, StatusCode> {
    let total_leads = lead::count_leads(&state.pool, None)
        .await
        .map_err(|err| count_failure(&err))?;
    let new_leads = lead::count_leads(&state.pool, Some(LeadStatus::New))
        .await
        .map_err(|err| count_failure(&err))?;
    let total_services = catalog::count_services(&state.pool, false)
        .await
        .map_err(|err| catalog_count_failure(&err))?;
    let active_services = catalog::count_services(&state.pool, true)
        .await
        .map_err(|err| catalog_count_failure(&err))?;
    let recent_leads = lead::recent_leads(&state.pool, RECENT_LEADS_LIMIT)
        .await
        .map_err(|err| count_failure(&err))?;

    Ok(Json(DashboardStats {
        total_leads,
        new_leads,
        total_services,
        active_services,
        recent_leads,
    }))
}

fn count_failure(err: &lead::LeadError) -> StatusCode {
    tracing::error!(error = %err, "dashboard lead query failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

fn catalog_count_failure(err: &catalog::CatalogError) -> StatusCode {
    tracing::error!(error = %err, "dashboard catalog query failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
