//! Auth routes — sign-up, sign-in, sign-out, and the session extractors.
//!
//! DESIGN
//! ======
//! Sign-in failures collapse into three user-facing categories (bad
//! credentials, unverified email, other); everything else passes through
//! its underlying message. The admin area is gated by the `AdminUser`
//! extractor: 401 without a session, 403 for a non-admin account.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use time::Duration;

use crate::services::account::{self, AccountError};
use crate::services::session;
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_BASE_URL")
        .map(|url| url.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

/// Authenticated admin. A valid session without the admin flag is rejected
/// with 403; no session at all with 401.
pub struct AdminUser {
    pub user: session::SessionUser,
}

pub(crate) fn require_admin(user: &session::SessionUser) -> Result<(), StatusCode> {
    if user.is_admin {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        require_admin(&auth.user)?;
        Ok(Self { user: auth.user })
    }
}

// =============================================================================
// FAILURE CLASSIFICATION
// =============================================================================

/// Map a sign-in failure to its user-facing category.
pub(crate) fn classify_signin_error(err: &AccountError) -> (StatusCode, &'static str, String) {
    match err {
        AccountError::InvalidCredentials | AccountError::InvalidEmail => (
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "Invalid email or password. Please try again.".to_owned(),
        ),
        AccountError::EmailNotConfirmed => (
            StatusCode::UNAUTHORIZED,
            "email_not_confirmed",
            "Please check your email and verify your account.".to_owned(),
        ),
        other => (StatusCode::INTERNAL_SERVER_ERROR, "other", other.to_string()),
    }
}

pub(crate) fn classify_signup_error(err: &AccountError) -> (StatusCode, &'static str, String) {
    match err {
        AccountError::EmailTaken => (
            StatusCode::CONFLICT,
            "email_taken",
            "This email is already registered. Please sign in instead.".to_owned(),
        ),
        AccountError::InvalidEmail | AccountError::WeakPassword => {
            (StatusCode::UNPROCESSABLE_ENTITY, "validation", err.to_string())
        }
        other => (StatusCode::INTERNAL_SERVER_ERROR, "other", other.to_string()),
    }
}

fn failure_response(status: StatusCode, code: &str, message: String) -> Response {
    (status, Json(serde_json::json!({ "code": code, "message": message }))).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyBody {
    pub email: String,
    pub code: String,
}

/// `POST /api/auth/signup` — create an unverified account and send a code.
pub async fn signup(State(state): State<AppState>, Json(body): Json<Credentials>) -> Response {
    let (user_id, code) = match account::sign_up(
        &state.pool,
        &body.email,
        &body.password,
        state.admin_email.as_deref(),
    )
    .await
    {
        Ok(created) => created,
        Err(err) => {
            let (status, code, message) = classify_signup_error(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %err, "sign-up failed");
            }
            return failure_response(status, code, message);
        }
    };

    if let Err(err) = account::deliver_verify_code(&body.email, &code).await {
        // The account exists and the code is stored; delivery can be retried
        // by signing up support out of band, so this stays a warning.
        tracing::warn!(error = %err, "verification code delivery failed");
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": user_id,
            "message": "Please check your email to verify your account."
        })),
    )
        .into_response()
}

/// `POST /api/auth/verify-email` — consume a code, confirm the account.
pub async fn verify_email(State(state): State<AppState>, Json(body): Json<VerifyBody>) -> Response {
    match account::verify_email(&state.pool, &body.email, &body.code).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err @ (AccountError::VerificationFailed | AccountError::InvalidEmail)) => {
            failure_response(StatusCode::BAD_REQUEST, "verification_failed", err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "email verification failed");
            failure_response(StatusCode::INTERNAL_SERVER_ERROR, "other", err.to_string())
        }
    }
}

/// `POST /api/auth/signin` — check credentials, set the session cookie.
pub async fn signin(State(state): State<AppState>, jar: CookieJar, Json(body): Json<Credentials>) -> Response {
    let user = match account::sign_in(&state.pool, &body.email, &body.password).await {
        Ok(user) => user,
        Err(err) => {
            let (status, code, message) = classify_signin_error(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!(error = %err, "sign-in failed");
            }
            return failure_response(status, code, message);
        }
    };

    let token = match session::create_session(&state.pool, user.id).await {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(error = %err, "session creation failed");
            return failure_response(StatusCode::INTERNAL_SERVER_ERROR, "other", err.to_string());
        }
    };

    let jar = jar.add(session_cookie(token));
    (
        jar,
        Json(serde_json::json!({
            "id": user.id,
            "email": user.email,
            "is_admin": user.is_admin,
        })),
    )
        .into_response()
}

/// `POST /api/auth/signout` — delete session, clear cookie.
pub async fn signout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;
    let jar = CookieJar::new().add(clear_session_cookie());
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
