//! Lead service — intake, listing, filtering, status workflow, CSV export.
//!
//! DESIGN
//! ======
//! The admin screen fetches the full collection once and narrows it with an
//! in-memory filter pass; the filter never changes the query sent to the
//! database. Status and timestamps are defaulted by the database at insert,
//! never by the submitter.

use sqlx::{PgPool, Row};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::validate::ValidLead;

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("lead not found: {0}")]
    NotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Lead workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Closed,
}

impl LeadStatus {
    #[must_use]
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "qualified" => Some(Self::Qualified),
            "converted" => Some(Self::Converted),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Converted => "converted",
            Self::Closed => "closed",
        }
    }
}

/// Row shape shared by the list, dashboard, and export paths.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LeadRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub service_interest: Option<String>,
    pub status: LeadStatus,
    pub created_at: OffsetDateTime,
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Insert a validated draft. Status and timestamp are left to the database.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn insert_lead(pool: &PgPool, lead: &ValidLead) -> Result<Uuid, LeadError> {
    let row = sqlx::query(
        "INSERT INTO leads (name, email, phone, company, message, service_interest)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(&lead.name)
    .bind(&lead.email)
    .bind(&lead.phone)
    .bind(&lead.company)
    .bind(&lead.message)
    .bind(&lead.service_interest)
    .fetch_one(pool)
    .await?;

    Ok(row.get("id"))
}

fn row_to_lead(r: &sqlx::postgres::PgRow) -> LeadRow {
    let status: String = r.get("status");
    LeadRow {
        id: r.get("id"),
        name: r.get("name"),
        email: r.get("email"),
        phone: r.get("phone"),
        company: r.get("company"),
        message: r.get("message"),
        service_interest: r.get("service_interest"),
        status: LeadStatus::from_str(&status).unwrap_or(LeadStatus::New),
        created_at: r.get("created_at"),
    }
}

/// Full collection, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_leads(pool: &PgPool) -> Result<Vec<LeadRow>, LeadError> {
    let rows = sqlx::query(
        "SELECT id, name, email, phone, company, message, service_interest, status, created_at
         FROM leads ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_lead).collect())
}

/// The newest `limit` leads, for the dashboard feed.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn recent_leads(pool: &PgPool, limit: i64) -> Result<Vec<LeadRow>, LeadError> {
    let rows = sqlx::query(
        "SELECT id, name, email, phone, company, message, service_interest, status, created_at
         FROM leads ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_lead).collect())
}

/// Update one lead's status.
///
/// # Errors
///
/// `NotFound` when no row matches, or a database error.
pub async fn update_status(pool: &PgPool, id: Uuid, status: LeadStatus) -> Result<(), LeadError> {
    let result = sqlx::query("UPDATE leads SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(LeadError::NotFound(id));
    }
    Ok(())
}

/// Delete one lead.
///
/// # Errors
///
/// `NotFound` when no row matches, or a database error.
pub async fn delete_lead(pool: &PgPool, id: Uuid) -> Result<(), LeadError> {
    let result = sqlx::query("DELETE FROM leads WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(LeadError::NotFound(id));
    }
    Ok(())
}

/// Total lead count, optionally narrowed to one status.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn count_leads(pool: &PgPool, status: Option<LeadStatus>) -> Result<i64, LeadError> {
    let count = match status {
        Some(status) => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(count)
}

// =============================================================================
// FILTERING
// =============================================================================

/// In-memory filter pass: case-insensitive substring match on
/// name/email/company AND exact status match. An empty query matches every
/// row; a `None` status means "all".
#[must_use]
pub fn filter_leads(leads: Vec<LeadRow>, query: &str, status: Option<LeadStatus>) -> Vec<LeadRow> {
    let needle = query.trim().to_lowercase();
    leads
        .into_iter()
        .filter(|lead| {
            let matches_search = needle.is_empty()
                || lead.name.to_lowercase().contains(&needle)
                || lead.email.to_lowercase().contains(&needle)
                || lead
                    .company
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle));
            let matches_status = status.is_none_or(|s| lead.status == s);
            matches_search && matches_status
        })
        .collect()
}

// =============================================================================
// CSV EXPORT
// =============================================================================

const CSV_HEADER: [&str; 8] = ["Name", "Email", "Phone", "Company", "Service", "Status", "Message", "Date"];

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Serialize a (possibly filtered) lead list as CSV: a header row plus one
/// quoted row per lead, embedded quotes doubled. N leads produce exactly
/// N+1 lines.
#[must_use]
pub fn export_csv(leads: &[LeadRow]) -> String {
    let mut lines = Vec::with_capacity(leads.len() + 1);
    lines.push(
        CSV_HEADER
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for lead in leads {
        let fields = [
            lead.name.as_str(),
            lead.email.as_str(),
            lead.phone.as_deref().unwrap_or(""),
            lead.company.as_deref().unwrap_or(""),
            lead.service_interest.as_deref().unwrap_or(""),
            lead.status.as_str(),
            lead.message.as_deref().unwrap_or(""),
            &csv_date(lead.created_at.date()),
        ];
        lines.push(fields.map(csv_field).join(","));
    }

    lines.join("\n")
}

/// Download name for an export taken on `date`: `leads-<ISO-date>.csv`.
#[must_use]
pub fn export_filename(date: Date) -> String {
    format!("leads-{}.csv", csv_date(date))
}

#[cfg(test)]
#[path = "lead_test.rs"]
mod tests;
