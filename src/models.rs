use serde::{Deserialize, Serialize};

/// Authenticated identity carried by the session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Opaque provider subject identifier
    pub id: String,
    pub email: String,
    /// Display name, falls back to the email address
    pub name: String,
}

/// Identity returned by a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<GoogleUser> for SessionUser {
    fn from(user: GoogleUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Health check response body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
