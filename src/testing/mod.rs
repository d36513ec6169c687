//! Testing utilities for siteauth
//!
//! Compiled for unit tests and behind the `testing` feature for the
//! integration tests in `tests/`.
//!
//! - [`fixtures`] - settings, session manager and user test data
//! - [`mock`] - a stub [`IdentityProvider`](crate::oauth::IdentityProvider)
//! - [`requests`] - request builders carrying session and state cookies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use siteauth::testing::{create_test_session_manager, session_request, test_user};
//!
//! let manager = create_test_session_manager();
//! let req = session_request(&manager, "/auth/me");
//! assert_eq!(manager.read(&req).unwrap(), Some(test_user()));
//! ```

pub mod fixtures;
pub mod mock;
pub mod requests;

pub use fixtures::{
    create_test_session_manager, create_test_settings, test_google_user, test_user,
};
pub use mock::StubIdentityProvider;
pub use requests::{callback_request, session_cookie_value, session_request};

/// Common test constants
pub mod constants {
    /// Session secret long enough to sign with
    pub const TEST_SESSION_SECRET: &str = "test-session-secret-0123456789";

    /// Client id the stub provider puts in authorization URLs
    pub const TEST_CLIENT_ID: &str = "test-client-id.apps.googleusercontent.com";

    /// Default test subject identifier
    pub const TEST_USER_ID: &str = "109876543210";

    /// Default test email address
    pub const TEST_EMAIL: &str = "ada@example.com";

    /// Default test user name
    pub const TEST_USER_NAME: &str = "Ada Lovelace";
}
