//! Site settings — a flat key/value map upserted by key.
//!
//! DESIGN
//! ======
//! Keys are constrained to the recognized contact/SEO catalog so the map
//! stays a convention-bound flat mapping rather than an open dumping
//! ground. There is no deletion path.

use std::collections::HashMap;

use sqlx::{PgPool, Row};

/// Recognized setting keys: contact details and SEO/social fields.
pub const RECOGNIZED_KEYS: [&str; 10] = [
    "whatsapp_number",
    "email",
    "phone",
    "address",
    "meta_title",
    "meta_description",
    "google_analytics_id",
    "linkedin_url",
    "twitter_url",
    "facebook_url",
];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting key: {0}")]
    UnknownKey(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[must_use]
pub fn is_recognized_key(key: &str) -> bool {
    RECOGNIZED_KEYS.contains(&key)
}

/// Fetch the full settings map.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn fetch_all(pool: &PgPool) -> Result<HashMap<String, String>, SettingsError> {
    let rows = sqlx::query("SELECT key, value FROM site_settings")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.get("key"), r.get("value")))
        .collect())
}

/// Upsert every entry by key, refreshing `updated_at`. Keys outside the
/// recognized catalog are rejected before any write is issued.
///
/// # Errors
///
/// `UnknownKey` for an unrecognized key, or a database error.
pub async fn upsert_all(pool: &PgPool, entries: &HashMap<String, String>) -> Result<(), SettingsError> {
    if let Some(bad) = entries.keys().find(|k| !is_recognized_key(k)) {
        return Err(SettingsError::UnknownKey(bad.clone()));
    }

    for (key, value) in entries {
        sqlx::query(
            "INSERT INTO site_settings (key, value, updated_at)
             VALUES ($1, $2, now())
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
