//! Session Management Module
//!
//! Cookie-carried state for the sign-in flow.
//!
//! # Modules
//!
//! - [`cookie`] - Cookie names, lifetimes and header helpers
//! - [`state`] - OAuth `state` cookie (CSRF protection)
//! - [`secret`] - Validated session signing key
//! - [`manager`] - Stateless signed session cookie

pub mod cookie;
pub mod manager;
pub mod secret;
pub mod state;

// Re-export commonly used items for convenience
pub use cookie::{is_secure_request, OAUTH_STATE_COOKIE_NAME, SESSION_COOKIE_NAME};
pub use manager::SessionManager;
pub use secret::{SessionSecret, MIN_SESSION_SECRET_LEN};
pub use state::StateTokenManager;
