use std::fmt;

use hmac::Mac;

use crate::errors::ConfigError;
use crate::utils::crypto::{constant_time_eq, sign_hmac_sha256, HmacSha256};

/// Minimum accepted length of `SESSION_SECRET`, in characters
pub const MIN_SESSION_SECRET_LEN: usize = 16;

/// Validated signing key for session cookies
///
/// Only obtainable through [`SessionSecret::new`], so holding one means the
/// configured secret passed the length check.
#[derive(Clone)]
pub struct SessionSecret {
    keyed: HmacSha256,
}

impl SessionSecret {
    /// Validate the configured secret and prepare the HMAC key
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SessionSecret`] when the secret is unset or
    /// shorter than [`MIN_SESSION_SECRET_LEN`] characters.
    pub fn new(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = raw
            .filter(|secret| secret.chars().count() >= MIN_SESSION_SECRET_LEN)
            .ok_or(ConfigError::SessionSecret)?;

        let keyed = <HmacSha256 as Mac>::new_from_slice(raw.as_bytes())
            .map_err(|_| ConfigError::SessionSecret)?;

        Ok(Self { keyed })
    }

    /// Base64url HMAC-SHA256 signature over `payload`
    #[must_use]
    pub fn sign(&self, payload: &str) -> String {
        sign_hmac_sha256(&self.keyed, payload.as_bytes())
    }

    /// Recompute the signature for `payload` and compare in constant time
    #[must_use]
    pub fn verify(&self, payload: &str, signature: &str) -> bool {
        let expected = self.sign(payload);
        constant_time_eq(expected.as_bytes(), signature.as_bytes())
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(<redacted>)")
    }
}
