//! OAuth `state` cookie for CSRF protection of the sign-in round trip
//!
//! A fresh random state is issued for every sign-in attempt, stored in a
//! short-lived `HttpOnly` cookie and echoed back by the provider on the
//! callback. The callback accepts the attempt only when both copies are
//! present and identical, and clears the cookie whatever the outcome.

use actix_web::{cookie::Cookie, HttpRequest};

use super::cookie::{
    build_cookie, create_expired_cookie, extract_cookie_value, is_secure_request,
    OAUTH_STATE_COOKIE_NAME, OAUTH_STATE_MAX_AGE_SECS,
};
use crate::utils::crypto::{constant_time_eq, generate_state_token};

/// Issues, reads and clears the `oauth_state` cookie
#[derive(Debug, Clone, Copy, Default)]
pub struct StateTokenManager;

impl StateTokenManager {
    /// Generate a state token and the cookie that stores it
    ///
    /// The caller attaches the cookie to its response.
    #[must_use]
    pub fn issue(&self, req: &HttpRequest) -> (String, Cookie<'static>) {
        let state = generate_state_token();
        let cookie = build_cookie(
            OAUTH_STATE_COOKIE_NAME,
            state.clone(),
            OAUTH_STATE_MAX_AGE_SECS,
            is_secure_request(req),
        );
        (state, cookie)
    }

    /// Stored state from the request cookies, if any
    #[must_use]
    pub fn read(&self, req: &HttpRequest) -> Option<String> {
        extract_cookie_value(req, OAUTH_STATE_COOKIE_NAME)
    }

    /// Cookie that expires the stored state immediately
    #[must_use]
    pub fn clear(&self, req: &HttpRequest) -> Cookie<'static> {
        create_expired_cookie(OAUTH_STATE_COOKIE_NAME, is_secure_request(req))
    }

    /// Whether the stored and received states are both present, non-empty and equal
    #[must_use]
    pub fn matches(stored: Option<&str>, received: Option<&str>) -> bool {
        match (stored, received) {
            (Some(stored), Some(received)) if !stored.is_empty() && !received.is_empty() => {
                constant_time_eq(stored.as_bytes(), received.as_bytes())
            }
            _ => false,
        }
    }
}
