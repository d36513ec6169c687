//! Error types shared across the site server
//!
//! Only configuration problems are surfaced to the client. Everything a
//! visitor can influence (cookies, query parameters, upstream responses)
//! resolves to "no session" or a plain redirect instead.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::session::MIN_SESSION_SECRET_LEN;
use crate::utils::response_builder::ResponseBuilder;

/// Operator-side misconfiguration that aborts the request needing it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `SESSION_SECRET` is unset or shorter than the minimum length
    #[error(
        "SESSION_SECRET must be set and at least {} characters (for signing)",
        MIN_SESSION_SECRET_LEN
    )]
    SessionSecret,

    /// `GOOGLE_CLIENT_ID` is unset
    #[error("GOOGLE_CLIENT_ID is not configured")]
    MissingClientId,
}

impl ResponseError for ConfigError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Aborting request on configuration error: {self}");
        ResponseBuilder::configuration_error(self, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_config_error_renders_server_error() {
        let response = ConfigError::SessionSecret.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "configuration_error");
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("SESSION_SECRET"));
    }

    #[test]
    fn test_missing_client_id_message() {
        assert_eq!(
            ConfigError::MissingClientId.to_string(),
            "GOOGLE_CLIENT_ID is not configured"
        );
        assert_eq!(
            ConfigError::MissingClientId.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
