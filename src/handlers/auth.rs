// Authentication handlers: sign-in and sign-out
use actix_web::{http::header, web, HttpRequest, HttpResponse};

use super::helpers::callback_redirect_uri;
use super::HOME_PATH;
use crate::errors::ConfigError;
use crate::oauth::IdentityProvider;
use crate::session::cookie::extract_cookie_value;
use crate::session::{is_secure_request, SessionManager, StateTokenManager, SESSION_COOKIE_NAME};
use crate::utils::logging::LoggingHelper;
use crate::utils::response_builder::ResponseBuilder;

/// Start Google sign-in: issue a state cookie and redirect to the provider
///
/// # Errors
///
/// Returns [`ConfigError::MissingClientId`] (rendered as a 500) when no
/// client id is configured
pub async fn google_sign_in(
    req: HttpRequest,
    provider: web::Data<dyn IdentityProvider>,
) -> Result<HttpResponse, ConfigError> {
    let redirect_uri = callback_redirect_uri(&req);
    let (state, state_cookie) = StateTokenManager.issue(&req);

    let auth_url = provider.authorization_url(&redirect_uri, &state)?;

    LoggingHelper::log_sign_in_redirect(&redirect_uri, is_secure_request(&req));
    Ok(HttpResponse::Found()
        .cookie(state_cookie)
        .insert_header((header::LOCATION, auth_url))
        .finish())
}

/// Sign out: expire the session cookie and go home
pub async fn sign_out(
    req: HttpRequest,
    session_manager: web::Data<SessionManager>,
) -> HttpResponse {
    let had_session = extract_cookie_value(&req, SESSION_COOKIE_NAME).is_some();
    LoggingHelper::log_signed_out(had_session);

    ResponseBuilder::redirect_with_cookie(HOME_PATH, session_manager.clear(&req))
}
