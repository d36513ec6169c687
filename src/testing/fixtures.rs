//! Pre-built test data

use crate::models::{GoogleUser, SessionUser};
use crate::session::SessionManager;
use crate::settings::SiteSettings;

use super::constants::{
    TEST_CLIENT_ID, TEST_EMAIL, TEST_SESSION_SECRET, TEST_USER_ID, TEST_USER_NAME,
};

/// Settings with a usable session secret and Google credentials
#[must_use]
pub fn create_test_settings() -> SiteSettings {
    let mut settings = SiteSettings::default();
    settings.application.host = "127.0.0.1".to_string();
    settings.session.session_secret = Some(TEST_SESSION_SECRET.to_string());
    settings.google.client_id = Some(TEST_CLIENT_ID.to_string());
    settings.google.client_secret = Some("test-client-secret".to_string());
    settings
}

#[must_use]
pub fn create_test_session_manager() -> SessionManager {
    SessionManager::from_settings(&create_test_settings())
}

/// Identity the stub provider returns from a successful exchange
#[must_use]
pub fn test_google_user() -> GoogleUser {
    GoogleUser {
        id: TEST_USER_ID.to_string(),
        email: TEST_EMAIL.to_string(),
        name: TEST_USER_NAME.to_string(),
    }
}

#[must_use]
pub fn test_user() -> SessionUser {
    SessionUser::from(test_google_user())
}
