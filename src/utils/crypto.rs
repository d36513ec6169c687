// Cryptographic utilities for state tokens, cookie signatures and token decoding

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub type HmacSha256 = Hmac<Sha256>;

/// Random bytes behind each OAuth state token (256 bits)
pub const STATE_TOKEN_BYTES: usize = 32;

/// Generate a cryptographically secure OAuth state token
///
/// # Returns
///
/// A lowercase hex string of `2 * STATE_TOKEN_BYTES` characters
#[must_use]
pub fn generate_state_token() -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Encode bytes as unpadded base64url
#[must_use]
pub fn encode_base64url(data: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(data)
}

/// Decode base64url, accepting input with or without trailing padding
///
/// # Errors
///
/// Returns an error if the input is not valid base64url in either form
pub fn decode_base64url(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(data)
        .or_else(|_| general_purpose::URL_SAFE.decode(data))
}

/// Sign a message with a keyed HMAC-SHA256 instance
///
/// The keyed instance is cloned so one key setup serves every request.
///
/// # Returns
///
/// The signature as unpadded base64url
#[must_use]
pub fn sign_hmac_sha256(keyed: &HmacSha256, message: &[u8]) -> String {
    let mut mac = keyed.clone();
    mac.update(message);
    encode_base64url(&mac.finalize().into_bytes())
}

/// Compare two byte strings in time independent of where they differ
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
