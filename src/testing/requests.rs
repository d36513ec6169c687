//! HTTP request builders for testing handlers

use actix_web::cookie::Cookie;
use actix_web::{test::TestRequest, HttpRequest};
use chrono::Utc;

use crate::session::{SessionManager, OAUTH_STATE_COOKIE_NAME, SESSION_COOKIE_NAME};

use super::fixtures::test_user;

/// Signed session value for [`test_user`]
///
/// # Panics
///
/// Panics if `manager` has no usable secret
#[must_use]
pub fn session_cookie_value(manager: &SessionManager) -> String {
    manager
        .encode(&test_user(), Utc::now())
        .expect("test session manager must be configured")
}

/// GET request for `path` carrying a valid session cookie
#[must_use]
pub fn session_request(manager: &SessionManager, path: &str) -> HttpRequest {
    TestRequest::get()
        .uri(path)
        .cookie(Cookie::new(SESSION_COOKIE_NAME, session_cookie_value(manager)))
        .to_http_request()
}

/// Callback request `https://site/auth/callback?<query>`, optionally with a stored state cookie
#[must_use]
pub fn callback_request(query: &str, stored_state: Option<&str>) -> HttpRequest {
    let mut builder = TestRequest::get().uri(&format!("https://site/auth/callback?{query}"));
    if let Some(state) = stored_state {
        builder = builder.cookie(Cookie::new(OAUTH_STATE_COOKIE_NAME, state.to_string()));
    }
    builder.to_http_request()
}
