//! Session Manager - Stateless Signed Session Cookies
//!
//! The session cookie is the whole session: there is no server-side store.
//! Its value is `<payload>.<signature>` where `payload` is the base64url
//! JSON `{id, email, name, iat}` and `signature` is the base64url
//! HMAC-SHA256 of the encoded payload under `SESSION_SECRET`.
//!
//! Reading never fails on visitor-controlled input. A cookie that does not
//! split cleanly, does not verify, or does not decode to a complete payload
//! is simply no session. The only error is a missing or short secret, which
//! is reported on every operation that has to sign or verify.

use actix_web::{cookie::Cookie, HttpRequest};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::cookie::{
    build_cookie, create_expired_cookie, extract_cookie_value, is_secure_request,
    SESSION_COOKIE_NAME, SESSION_MAX_AGE_SECS,
};
use super::secret::SessionSecret;
use crate::errors::ConfigError;
use crate::models::SessionUser;
use crate::settings::SiteSettings;
use crate::utils::crypto::{decode_base64url, encode_base64url};
use crate::utils::logging::LoggingHelper;

/// Separator between payload and signature; absent from the base64url alphabet
const SEPARATOR: char = '.';

#[derive(Deserialize)]
struct StoredClaims {
    id: Option<String>,
    email: Option<String>,
    name: Option<String>,
}

/// Session Manager for stateless signed session handling
#[derive(Debug, Clone)]
pub struct SessionManager {
    // Validated once; the error is kept and reported at first use
    secret: Result<SessionSecret, ConfigError>,
}

impl SessionManager {
    /// Create a session manager from the configured secret
    ///
    /// Construction always succeeds so that a bad secret surfaces as a
    /// configuration error on the requests that need it.
    #[must_use]
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: SessionSecret::new(secret),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self::new(settings.session.session_secret.as_deref())
    }

    /// Whether the configured secret is usable
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.secret.is_ok()
    }

    fn secret(&self) -> Result<&SessionSecret, ConfigError> {
        self.secret.as_ref().map_err(Clone::clone)
    }

    /// Mint a session cookie for `user`, issued now
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionSecret`] if the secret is unset or too short
    pub fn create(
        &self,
        user: &SessionUser,
        req: &HttpRequest,
    ) -> Result<Cookie<'static>, ConfigError> {
        self.create_at(user, Utc::now(), req)
    }

    /// Mint a session cookie for `user` with an explicit issue time
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionSecret`] if the secret is unset or too short
    pub fn create_at(
        &self,
        user: &SessionUser,
        issued_at: DateTime<Utc>,
        req: &HttpRequest,
    ) -> Result<Cookie<'static>, ConfigError> {
        let value = self.encode(user, issued_at)?;
        Ok(build_cookie(
            SESSION_COOKIE_NAME,
            value,
            SESSION_MAX_AGE_SECS,
            is_secure_request(req),
        ))
    }

    /// Signed cookie value `<payload>.<signature>` for `user`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionSecret`] if the secret is unset or too short
    pub fn encode(
        &self,
        user: &SessionUser,
        issued_at: DateTime<Utc>,
    ) -> Result<String, ConfigError> {
        let secret = self.secret()?;

        let claims = json!({
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "iat": issued_at.timestamp(),
        });
        let payload = encode_base64url(claims.to_string().as_bytes());
        let signature = secret.sign(&payload);

        Ok(format!("{payload}{SEPARATOR}{signature}"))
    }

    /// Current session user from the request cookies
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionSecret`] if a session cookie is present
    /// and the secret is unset or too short. Every other failure is `Ok(None)`.
    pub fn read(&self, req: &HttpRequest) -> Result<Option<SessionUser>, ConfigError> {
        match extract_cookie_value(req, SESSION_COOKIE_NAME) {
            Some(value) => self.decode(&value),
            None => Ok(None),
        }
    }

    /// Verify and decode a raw session cookie value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionSecret`] if the secret is unset or too short
    pub fn decode(&self, value: &str) -> Result<Option<SessionUser>, ConfigError> {
        let secret = self.secret()?;

        let Some((payload, signature)) = split_cookie_value(value) else {
            LoggingHelper::log_session_rejected("malformed value");
            return Ok(None);
        };

        if !secret.verify(payload, signature) {
            LoggingHelper::log_session_rejected("signature mismatch");
            return Ok(None);
        }

        let user = decode_base64url(payload)
            .ok()
            .and_then(|json| serde_json::from_slice::<StoredClaims>(&json).ok())
            .and_then(into_session_user);

        if user.is_none() {
            LoggingHelper::log_session_rejected("incomplete payload");
        }
        Ok(user)
    }

    /// Cookie that expires the session immediately
    #[must_use]
    pub fn clear(&self, req: &HttpRequest) -> Cookie<'static> {
        create_expired_cookie(SESSION_COOKIE_NAME, is_secure_request(req))
    }
}

/// Split into exactly two non-empty halves
fn split_cookie_value(value: &str) -> Option<(&str, &str)> {
    let (payload, signature) = value.split_once(SEPARATOR)?;
    if payload.is_empty() || signature.is_empty() || signature.contains(SEPARATOR) {
        return None;
    }
    Some((payload, signature))
}

fn into_session_user(claims: StoredClaims) -> Option<SessionUser> {
    let id = claims.id.filter(|id| !id.is_empty())?;
    let email = claims.email.filter(|email| !email.is_empty())?;
    let name = claims.name.unwrap_or_else(|| email.clone());
    Some(SessionUser { id, email, name })
}
