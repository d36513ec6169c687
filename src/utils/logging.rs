// Centralized logging for the sign-in flow. Never pass secrets, codes, state
// values or cookie values to these helpers.
use log::{debug, info, warn};

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the redirect to the identity provider
    pub fn log_sign_in_redirect(redirect_uri: &str, secure: bool) {
        info!("🔐 Redirecting to Google sign-in (callback: {redirect_uri}, secure cookies: {secure})");
    }

    /// Log a callback rejected because the state cookie and query did not agree
    pub fn log_state_rejected(cookie_present: bool, query_present: bool) {
        warn!(
            "OAuth callback rejected: state validation failed (cookie present: {cookie_present}, query present: {query_present})"
        );
    }

    /// Log a callback that passed the state check but carried no code
    pub fn log_missing_code(provider_error: Option<&str>) {
        match provider_error {
            Some(error) => info!("OAuth callback without code, provider reported: {error}"),
            None => info!("OAuth callback without code"),
        }
    }

    /// Log token exchange start
    pub fn log_token_exchange_start(redirect_uri: &str) {
        info!("🔄 Exchanging authorization code for tokens (redirect_uri: {redirect_uri})");
    }

    /// Log token exchange summary
    pub fn log_token_exchange_summary(id_token_present: bool, scope: Option<&str>) {
        debug!(
            "🔍 Token exchange summary: id_token={}, scope={:?}",
            if id_token_present { "present" } else { "missing" },
            scope
        );
    }

    /// Log a failed code exchange; the detail stays server-side
    pub fn log_exchange_failed(error: &dyn std::fmt::Display) {
        warn!("❌ Failed to exchange code for user info: {error}");
    }

    /// Log session creation success
    pub fn log_session_created(user_email: &str) {
        info!("✅ Session created for user: {user_email}");
    }

    /// Log a session cookie that did not verify
    pub fn log_session_rejected(reason: &str) {
        debug!("Ignoring session cookie: {reason}");
    }

    /// Log sign out
    pub fn log_signed_out(had_session: bool) {
        info!("User signed out (session cookie present: {had_session})");
    }
}
