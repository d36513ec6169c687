//! Stub identity provider for handler tests
//!
//! Authorization URLs come from a real [`GoogleOAuthClient`] so redirects look
//! exactly like production; code exchanges never touch the network and
//! return a canned outcome instead.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::errors::ConfigError;
use crate::models::GoogleUser;
use crate::oauth::{GoogleOAuthClient, IdentityProvider, OAuthError};
use crate::settings::GoogleSettings;

use super::fixtures::test_google_user;

pub struct StubIdentityProvider {
    client: GoogleOAuthClient,
    user: Option<GoogleUser>,
    exchanges: Mutex<Vec<(String, String)>>,
}

impl StubIdentityProvider {
    /// Provider whose exchanges sign in [`test_google_user`]
    #[must_use]
    pub fn signing_in(client_id: &str) -> Self {
        Self::new(Some(client_id), Some(test_google_user()))
    }

    /// Provider whose exchanges are rejected by the token endpoint
    #[must_use]
    pub fn failing(client_id: &str) -> Self {
        Self::new(Some(client_id), None)
    }

    /// Provider without a client id
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(None, None)
    }

    /// # Panics
    ///
    /// Panics if the default Google endpoints fail to parse
    fn new(client_id: Option<&str>, user: Option<GoogleUser>) -> Self {
        let settings = GoogleSettings {
            client_id: client_id.map(str::to_string),
            client_secret: client_id.map(|_| "test-client-secret".to_string()),
            ..GoogleSettings::default()
        };
        let client = GoogleOAuthClient::from_settings(&settings)
            .expect("default Google endpoints are valid URLs");

        Self {
            client,
            user,
            exchanges: Mutex::new(Vec::new()),
        }
    }

    /// Every `(code, redirect_uri)` pair passed to `exchange_code`, in order
    #[must_use]
    pub fn exchanges(&self) -> Vec<(String, String)> {
        self.exchanges
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, ConfigError> {
        self.client.authorization_url(redirect_uri, state)
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleUser, OAuthError> {
        self.exchanges
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((code.to_string(), redirect_uri.to_string()));

        self.user.clone().ok_or_else(|| OAuthError::TokenExchange {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.to_string(),
        })
    }
}
