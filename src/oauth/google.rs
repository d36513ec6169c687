// Google OAuth 2.0 client: authorization redirect and code exchange

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{decode_id_token, IdentityProvider, OAuthError, OAUTH_SCOPE};
use crate::errors::ConfigError;
use crate::models::GoogleUser;
use crate::settings::GoogleSettings;
use crate::utils::logging::LoggingHelper;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    // Always present when the `openid` scope is granted
    id_token: Option<String>,
    scope: Option<String>,
}

/// Google identity provider backed by a shared `reqwest` client
#[derive(Clone)]
pub struct GoogleOAuthClient {
    client_id: Option<String>,
    client_secret: Option<String>,
    authorization_endpoint: Url,
    token_endpoint: Url,
    http_client: reqwest::Client,
}

impl GoogleOAuthClient {
    /// Build the client from settings
    ///
    /// Missing credentials are allowed here and reported per request.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Configuration`] if an endpoint is not a valid URL
    /// or the HTTP client cannot be constructed
    pub fn from_settings(settings: &GoogleSettings) -> Result<Self, OAuthError> {
        let authorization_endpoint =
            parse_endpoint("authorization_endpoint", &settings.authorization_endpoint)?;
        let token_endpoint = parse_endpoint("token_endpoint", &settings.token_endpoint)?;

        let mut builder = reqwest::Client::builder();
        if settings.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| OAuthError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            authorization_endpoint,
            token_endpoint,
            http_client,
        })
    }

    /// Whether both client id and client secret are set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str), OAuthError> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(OAuthError::Configuration(
                "GOOGLE_CLIENT_ID or GOOGLE_CLIENT_SECRET not configured".to_string(),
            )),
        }
    }
}

fn parse_endpoint(field: &str, value: &str) -> Result<Url, OAuthError> {
    Url::parse(value)
        .map_err(|e| OAuthError::Configuration(format!("Invalid Google {field} '{value}': {e}")))
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorization_url(&self, redirect_uri: &str, state: &str) -> Result<String, ConfigError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(ConfigError::MissingClientId)?;

        // Percent-encoded by hand so spaces in the scope render as %20
        let query = format!(
            "client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            urlencoding::encode(client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(OAUTH_SCOPE),
            urlencoding::encode(state),
        );

        let mut url = self.authorization_endpoint.clone();
        url.set_query(Some(&query));
        Ok(url.into())
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleUser, OAuthError> {
        let (client_id, client_secret) = self.credentials()?;

        let params = [
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        LoggingHelper::log_token_exchange_start(redirect_uri);
        let response = self
            .http_client
            .post(self.token_endpoint.clone())
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Failed to exchange code for token: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OAuthError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let tokens: TokenResponse = response.json().await.map_err(|e| {
            OAuthError::InvalidResponse(format!("Failed to parse token response: {e}"))
        })?;

        LoggingHelper::log_token_exchange_summary(
            tokens.id_token.is_some(),
            tokens.scope.as_deref(),
        );

        let id_token = tokens.id_token.ok_or_else(|| {
            OAuthError::InvalidResponse("Token response has no id_token".to_string())
        })?;

        decode_id_token(&id_token)
    }
}
