//! OAuth authentication module
//!
//! The identity provider seam: building the authorization redirect and
//! trading an authorization code for a verified identity. Handlers only see
//! the [`IdentityProvider`] trait, so tests can swap in a stub.

pub mod google;
pub mod id_token;

pub use google::GoogleOAuthClient;
pub use id_token::decode_id_token;

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::ConfigError;
use crate::models::GoogleUser;

/// Google's authorization endpoint
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google's token endpoint
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Scopes requested on every sign-in
pub const OAUTH_SCOPE: &str = "openid email profile";

/// Path of the callback route, appended to the request origin
pub const CALLBACK_PATH: &str = "/auth/callback";

/// Failures of the code exchange
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid id_token: {0}")]
    IdToken(String),
}

/// OAuth callback query parameters
///
/// The first occurrence of each parameter wins; anything unparsable is
/// treated as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl OAuthCallback {
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut callback = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "code" => &mut callback.code,
                "state" => &mut callback.state,
                "error" => &mut callback.error,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        callback
    }
}

/// External identity provider used by the sign-in handlers
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider authorization URL for a sign-in attempt
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingClientId`] if no client id is configured
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, ConfigError>;

    /// Exchange an authorization code for the signed-in user
    ///
    /// # Errors
    ///
    /// Returns an [`OAuthError`] on missing credentials, transport failure,
    /// a non-2xx response, or a malformed identity token
    async fn exchange_code(&self, code: &str, redirect_uri: &str)
        -> Result<GoogleUser, OAuthError>;
}
