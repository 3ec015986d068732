//! Account service — sign-up, sign-in, and email verification.
//!
//! DESIGN
//! ======
//! Passwords are salted and hashed at rest; verification codes are
//! short-lived six-character codes stored hashed and consumed on first
//! successful check. Sign-in failures collapse into the three categories
//! the sign-in screen distinguishes: bad credentials, unverified email,
//! and everything else.

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::session::bytes_to_hex;

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: i32 = 5;
const PASSWORD_MIN_LEN: usize = 6;
const VERIFY_EMAIL_TEMPLATE: &str = include_str!("../../templates/verify_email.html");

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    #[error("already registered")]
    EmailTaken,
    #[error("invalid login credentials")]
    InvalidCredentials,
    #[error("email not confirmed")]
    EmailNotConfirmed,
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

/// User row handed back to the sign-in route.
#[derive(Debug, Clone)]
pub struct AccountUser {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN
        || !normalized
            .chars()
            .all(|c| CODE_ALPHABET.contains(&(c as u8)))
    {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_verify_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[must_use]
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Salted password digest stored in the `users` table.
#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

#[must_use]
pub fn hash_verify_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Map a failed `users` insert. A unique violation on the email column
/// means the address was registered concurrently with the pre-check.
fn user_insert_error(err: sqlx::Error) -> AccountError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => AccountError::EmailTaken,
        _ => AccountError::Db(err),
    }
}

/// Create an unverified account and issue a verification code.
///
/// The account is flagged admin when the email matches `admin_email`.
/// Returns the new user id and the plaintext code for delivery.
///
/// # Errors
///
/// `InvalidEmail`, `WeakPassword`, `EmailTaken`, or a database error.
pub async fn sign_up(
    pool: &PgPool,
    email: &str,
    password: &str,
    admin_email: Option<&str>,
) -> Result<(Uuid, String), AccountError> {
    let normalized = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AccountError::WeakPassword);
    }

    let taken = sqlx::query("SELECT 1 AS one FROM users WHERE email = $1")
        .bind(&normalized)
        .fetch_optional(pool)
        .await?;
    if taken.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let salt = generate_salt();
    let password_hash = hash_password(&salt, password);
    let is_admin = admin_email
        .and_then(normalize_email)
        .is_some_and(|admin| admin == normalized);

    let row = sqlx::query(
        "INSERT INTO users (email, password_hash, password_salt, is_admin)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&normalized)
    .bind(&password_hash)
    .bind(&salt)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .map_err(user_insert_error)?;
    let user_id: Uuid = row.get("id");

    let code = issue_verify_code(pool, &normalized).await?;
    Ok((user_id, code))
}

/// Invalidate outstanding codes for the email and create a fresh one.
pub async fn issue_verify_code(pool: &PgPool, email: &str) -> Result<String, AccountError> {
    let normalized = normalize_email(email).ok_or(AccountError::InvalidEmail)?;

    sqlx::query("DELETE FROM email_verify_codes WHERE email = $1 AND consumed_at IS NULL")
        .bind(&normalized)
        .execute(pool)
        .await?;

    let code = generate_verify_code();
    sqlx::query("INSERT INTO email_verify_codes (email, code_hash) VALUES ($1, $2)")
        .bind(&normalized)
        .bind(hash_verify_code(&code))
        .execute(pool)
        .await?;

    Ok(code)
}

/// Consume a verification code and mark the account confirmed.
///
/// # Errors
///
/// `VerificationFailed` on a wrong, expired, or exhausted code.
pub async fn verify_email(pool: &PgPool, email: &str, code: &str) -> Result<(), AccountError> {
    let normalized_email = normalize_email(email).ok_or(AccountError::InvalidEmail)?;
    let normalized_code = normalize_code(code).ok_or(AccountError::VerificationFailed)?;
    let code_hash = hash_verify_code(&normalized_code);

    let consumed = sqlx::query(
        r"UPDATE email_verify_codes
          SET consumed_at = now()
          WHERE id = (
              SELECT id
              FROM email_verify_codes
              WHERE email = $1
                AND consumed_at IS NULL
                AND expires_at > now()
              ORDER BY created_at DESC
              LIMIT 1
          )
          AND code_hash = $2
          RETURNING id",
    )
    .bind(&normalized_email)
    .bind(&code_hash)
    .fetch_optional(pool)
    .await?;

    if consumed.is_none() {
        sqlx::query(
            r"UPDATE email_verify_codes
              SET attempts = attempts + 1,
                  consumed_at = CASE WHEN attempts + 1 >= $2 THEN now() ELSE consumed_at END
              WHERE id = (
                  SELECT id
                  FROM email_verify_codes
                  WHERE email = $1
                    AND consumed_at IS NULL
                    AND expires_at > now()
                  ORDER BY created_at DESC
                  LIMIT 1
              )",
        )
        .bind(&normalized_email)
        .bind(MAX_FAILED_ATTEMPTS)
        .execute(pool)
        .await?;
        return Err(AccountError::VerificationFailed);
    }

    sqlx::query("UPDATE users SET email_confirmed_at = now() WHERE email = $1 AND email_confirmed_at IS NULL")
        .bind(&normalized_email)
        .execute(pool)
        .await?;

    Ok(())
}

/// Check credentials and return the account.
///
/// # Errors
///
/// `InvalidCredentials` for an unknown email or wrong password,
/// `EmailNotConfirmed` for a valid but unverified account.
pub async fn sign_in(pool: &PgPool, email: &str, password: &str) -> Result<AccountUser, AccountError> {
    let normalized = normalize_email(email).ok_or(AccountError::InvalidCredentials)?;

    let row = sqlx::query(
        "SELECT id, email, password_hash, password_salt, is_admin, email_confirmed_at IS NOT NULL AS confirmed
         FROM users WHERE email = $1",
    )
    .bind(&normalized)
    .fetch_optional(pool)
    .await?
    .ok_or(AccountError::InvalidCredentials)?;

    let stored_hash: String = row.get("password_hash");
    let salt: String = row.get("password_salt");
    if hash_password(&salt, password) != stored_hash {
        return Err(AccountError::InvalidCredentials);
    }
    if !row.get::<bool, _>("confirmed") {
        return Err(AccountError::EmailNotConfirmed);
    }

    Ok(AccountUser { id: row.get("id"), email: row.get("email"), is_admin: row.get("is_admin") })
}

/// Deliver a verification code, or log it when email delivery is not
/// configured (`RESEND_API_KEY`/`RESEND_FROM`).
pub async fn deliver_verify_code(to_email: &str, code: &str) -> Result<(), AccountError> {
    let (Ok(api_key), Ok(from)) = (std::env::var("RESEND_API_KEY"), std::env::var("RESEND_FROM")) else {
        tracing::info!(email = to_email, code, "email delivery not configured, verification code logged");
        return Ok(());
    };

    let resend = Resend::new(&api_key);
    let to = [to_email];
    let subject = "Verify your CyberVision account";
    let html = render_verify_email_template(to_email, code);

    let email = CreateEmailBaseOptions::new(&from, to, subject).with_html(&html);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| AccountError::EmailDelivery(e.to_string()))?;
    Ok(())
}

#[must_use]
pub fn render_verify_email_template(email: &str, code: &str) -> String {
    VERIFY_EMAIL_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{CODE}}", code)
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
