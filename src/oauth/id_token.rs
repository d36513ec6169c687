//! ID token claim extraction
//!
//! The token arrives on the direct server-to-server response from the token
//! endpoint, so only its payload is decoded here. The provider signature is
//! not checked against the provider's published keys.

use serde::Deserialize;

use super::OAuthError;
use crate::models::GoogleUser;
use crate::utils::crypto::decode_base64url;

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: Option<String>,
    email: Option<String>,
    name: Option<String>,
}

/// Decode the payload segment of an ID token into a [`GoogleUser`]
///
/// `name` falls back to `email` when missing or empty.
///
/// # Errors
///
/// Returns [`OAuthError::IdToken`] if the payload segment is missing, is not
/// base64url JSON, or lacks a non-empty `sub` or `email` claim
pub fn decode_id_token(id_token: &str) -> Result<GoogleUser, OAuthError> {
    let payload = id_token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| OAuthError::IdToken("missing payload".to_string()))?;

    let json = decode_base64url(payload)
        .map_err(|e| OAuthError::IdToken(format!("Base64 decode failed: {e}")))?;
    let claims: IdTokenClaims = serde_json::from_slice(&json)
        .map_err(|e| OAuthError::IdToken(format!("JSON parse failed: {e}")))?;

    let (Some(id), Some(email)) = (
        claims.sub.filter(|sub| !sub.is_empty()),
        claims.email.filter(|email| !email.is_empty()),
    ) else {
        return Err(OAuthError::IdToken("missing sub or email claim".to_string()));
    };
    let name = claims
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| email.clone());

    Ok(GoogleUser { id, email, name })
}
