//! Public site routes — lead intake and read-only content.
//!
//! DESIGN
//! ======
//! Both forms run the shared validation pass before any database call; a
//! failed draft produces a 422 naming the first violated field and issues
//! no insert. Status and timestamps are defaulted by the database.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::collections::HashMap;

use crate::services::{catalog, lead, settings};
use crate::state::AppState;
use crate::validate::{self, LeadDraft, ValidLead, ValidationError};

fn validation_response(err: &ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "field": err.field, "message": err.message })),
    )
        .into_response()
}

fn intake_failure(err: &lead::LeadError, message: &str) -> Response {
    tracing::error!(error = %err, "lead insert failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

async fn insert_and_respond(state: &AppState, lead: &ValidLead, failure_message: &str) -> Response {
    match lead::insert_lead(&state.pool, lead).await {
        Ok(id) => (StatusCode::CREATED, Json(serde_json::json!({ "id": id }))).into_response(),
        Err(err) => intake_failure(&err, failure_message),
    }
}

/// `POST /api/contact` — contact-form lead intake.
pub async fn submit_contact(State(state): State<AppState>, Json(draft): Json<LeadDraft>) -> Response {
    let lead = match validate::contact_draft(&draft) {
        Ok(lead) => lead,
        Err(err) => return validation_response(&err),
    };
    insert_and_respond(&state, &lead, "Failed to send message. Please try again.").await
}

/// `POST /api/quote` — quote-form lead intake with the service-catalog check.
pub async fn submit_quote(State(state): State<AppState>, Json(draft): Json<LeadDraft>) -> Response {
    let lead = match validate::quote_draft(&draft) {
        Ok(lead) => lead,
        Err(err) => return validation_response(&err),
    };
    insert_and_respond(&state, &lead, "Failed to submit request. Please try again.").await
}

/// `GET /api/services` — active offerings, display order ascending.
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<catalog::ServiceRow>>, StatusCode> {
    let rows = catalog::list_active(&state.pool).await.map_err(|err| {
        tracing::error!(error = %err, "public service listing failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(rows))
}

/// `GET /api/settings` — public contact/SEO settings map.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<HashMap<String, String>>, StatusCode> {
    let map = settings::fetch_all(&state.pool).await.map_err(|err| {
        tracing::error!(error = %err, "settings fetch failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(map))
}

#[cfg(test)]
#[path = "public_test.rs"]
mod tests;
