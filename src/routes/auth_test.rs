use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_EB_INVALID_5150__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_XYZ_17__"), None);
}

// =============================================================================
// sign-in failure classification
// =============================================================================

#[test]
fn signin_bad_credentials_category() {
    let (status, code, _) = classify_signin_error(&AccountError::InvalidCredentials);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code, "invalid_credentials");
}

#[test]
fn signin_invalid_email_is_bad_credentials() {
    let (status, code, _) = classify_signin_error(&AccountError::InvalidEmail);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code, "invalid_credentials");
}

#[test]
fn signin_unconfirmed_email_category() {
    let (status, code, _) = classify_signin_error(&AccountError::EmailNotConfirmed);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code, "email_not_confirmed");
}

#[test]
fn signin_other_passes_through_message() {
    let err = AccountError::EmailDelivery("smtp down".into());
    let (status, code, message) = classify_signin_error(&err);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(code, "other");
    assert!(message.contains("smtp down"));
}

// =============================================================================
// sign-up failure classification
// =============================================================================

#[test]
fn signup_duplicate_email_is_conflict() {
    let (status, code, _) = classify_signup_error(&AccountError::EmailTaken);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code, "email_taken");
}

#[test]
fn signup_weak_password_is_validation() {
    let (status, code, message) = classify_signup_error(&AccountError::WeakPassword);
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(code, "validation");
    assert!(message.contains("6 characters"));
}

#[test]
fn signup_invalid_email_is_validation() {
    let (status, code, _) = classify_signup_error(&AccountError::InvalidEmail);
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(code, "validation");
}

// =============================================================================
// session extractors — the cookie check runs before any pool access, so
// the rejection path is testable without a live database.
// =============================================================================

use axum::extract::FromRequestParts;

use crate::state::test_helpers::test_app_state;

fn cookie_less_parts(uri: &str) -> axum::http::request::Parts {
    let (parts, ()) = axum::http::Request::builder()
        .uri(uri)
        .body(())
        .unwrap()
        .into_parts();
    parts
}

#[tokio::test]
async fn auth_user_rejects_missing_cookie_with_401() {
    let state = test_app_state();
    let mut parts = cookie_less_parts("/api/admin/leads");
    let rejection = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .map(|_| ())
        .unwrap_err();
    assert_eq!(rejection, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_user_rejects_empty_cookie_value_with_401() {
    let state = test_app_state();
    let (mut parts, ()) = axum::http::Request::builder()
        .uri("/api/admin/leads")
        .header(axum::http::header::COOKIE, format!("{COOKIE_NAME}="))
        .body(())
        .unwrap()
        .into_parts();
    let rejection = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .map(|_| ())
        .unwrap_err();
    assert_eq!(rejection, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_user_rejects_missing_cookie_with_401() {
    let state = test_app_state();
    let mut parts = cookie_less_parts("/api/admin/dashboard");
    let rejection = AdminUser::from_request_parts(&mut parts, &state)
        .await
        .map(|_| ())
        .unwrap_err();
    assert_eq!(rejection, StatusCode::UNAUTHORIZED);
}

#[test]
fn require_admin_rejects_non_admin_with_403() {
    let user = session::SessionUser {
        id: uuid::Uuid::nil(),
        email: "user@example.com".into(),
        is_admin: false,
    };
    assert_eq!(require_admin(&user), Err(StatusCode::FORBIDDEN));
}

#[test]
fn require_admin_accepts_admin() {
    let user = session::SessionUser {
        id: uuid::Uuid::nil(),
        email: "admin@example.com".into(),
        is_admin: true,
    };
    assert_eq!(require_admin(&user), Ok(()));
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax() {
    let cookie = session_cookie("abc123".to_owned());
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "abc123");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn clear_cookie_has_zero_max_age() {
    let cookie = clear_session_cookie();
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}
