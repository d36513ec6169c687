// OAuth callback handler
//
// Every outcome ends in a redirect home that expires the state cookie; only a
// successful exchange adds the session cookie. Rejections do not say which
// check failed.
use actix_web::{web, HttpRequest, HttpResponse};

use super::helpers::callback_redirect_uri;
use super::HOME_PATH;
use crate::models::SessionUser;
use crate::oauth::{IdentityProvider, OAuthCallback};
use crate::session::{SessionManager, StateTokenManager};
use crate::utils::logging::LoggingHelper;
use crate::utils::response_builder::ResponseBuilder;

pub async fn oauth_callback(
    req: HttpRequest,
    provider: web::Data<dyn IdentityProvider>,
    session_manager: web::Data<SessionManager>,
) -> HttpResponse {
    let callback = OAuthCallback::from_query(req.query_string());

    // Single use: the state cookie is expired on every path below
    let stored_state = StateTokenManager.read(&req);
    let clear_state = StateTokenManager.clear(&req);

    if !StateTokenManager::matches(stored_state.as_deref(), callback.state.as_deref()) {
        LoggingHelper::log_state_rejected(stored_state.is_some(), callback.state.is_some());
        return ResponseBuilder::redirect_with_cookie(HOME_PATH, clear_state);
    }

    // Missing code usually means the user declined consent
    let Some(code) = callback.code.as_deref().filter(|code| !code.is_empty()) else {
        LoggingHelper::log_missing_code(callback.error.as_deref());
        return ResponseBuilder::redirect_with_cookie(HOME_PATH, clear_state);
    };

    let redirect_uri = callback_redirect_uri(&req);
    let user = match provider.exchange_code(code, &redirect_uri).await {
        Ok(user) => SessionUser::from(user),
        Err(e) => {
            LoggingHelper::log_exchange_failed(&e);
            return ResponseBuilder::redirect_with_cookie(HOME_PATH, clear_state);
        }
    };

    match session_manager.create(&user, &req) {
        Ok(session_cookie) => {
            LoggingHelper::log_session_created(&user.email);
            ResponseBuilder::redirect(HOME_PATH, vec![clear_state, session_cookie])
        }
        Err(e) => {
            log::error!("Cannot create session after successful sign-in: {e}");
            ResponseBuilder::configuration_error(&e, vec![clear_state])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        callback_request, create_test_session_manager, test_google_user, StubIdentityProvider,
    };
    use actix_web::{
        cookie::time::Duration,
        http::{header, StatusCode},
    };
    use std::sync::Arc;

    const STATE: &str = "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000";

    async fn run(
        req: HttpRequest,
        stub: &Arc<StubIdentityProvider>,
        session_manager: SessionManager,
    ) -> HttpResponse {
        let provider: Arc<dyn IdentityProvider> = stub.clone();
        oauth_callback(
            req,
            web::Data::from(provider),
            web::Data::new(session_manager),
        )
        .await
    }

    fn assert_rejected(response: &HttpResponse) {
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name(), "oauth_state");
        assert_eq!(cookies[0].max_age(), Some(Duration::ZERO));
    }

    #[actix_web::test]
    async fn test_mismatched_state_rejected() {
        let stub = Arc::new(StubIdentityProvider::signing_in("abc"));
        let req = callback_request(&format!("code=c&state={STATE}"), Some("different"));

        let response = run(req, &stub, create_test_session_manager()).await;
        assert_rejected(&response);
        assert!(stub.exchanges().is_empty());
    }

    #[actix_web::test]
    async fn test_missing_state_on_either_side_rejected() {
        for (query, stored) in [
            ("code=c".to_string(), Some(STATE)),
            (format!("code=c&state={STATE}"), None),
            ("code=c".to_string(), None),
            ("code=c&state=".to_string(), None),
        ] {
            let stub = Arc::new(StubIdentityProvider::signing_in("abc"));
            let response = run(
                callback_request(&query, stored),
                &stub,
                create_test_session_manager(),
            )
            .await;
            assert_rejected(&response);
            assert!(stub.exchanges().is_empty(), "query: {query}");
        }
    }

    #[actix_web::test]
    async fn test_missing_code_rejected_after_state_check() {
        let stub = Arc::new(StubIdentityProvider::signing_in("abc"));
        let req = callback_request(&format!("error=access_denied&state={STATE}"), Some(STATE));

        let response = run(req, &stub, create_test_session_manager()).await;
        assert_rejected(&response);
        assert!(stub.exchanges().is_empty());
    }

    #[actix_web::test]
    async fn test_exchange_failure_rejected() {
        let stub = Arc::new(StubIdentityProvider::failing("abc"));
        let req = callback_request(&format!("code=c&state={STATE}"), Some(STATE));

        let response = run(req, &stub, create_test_session_manager()).await;
        assert_rejected(&response);
        assert_eq!(stub.exchanges().len(), 1);
    }

    #[actix_web::test]
    async fn test_successful_callback_creates_session() {
        let stub = Arc::new(StubIdentityProvider::signing_in("abc"));
        let req = callback_request(&format!("code=4%2Fcode&state={STATE}"), Some(STATE));
        let session_manager = create_test_session_manager();

        let response = run(req, &stub, session_manager.clone()).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        assert_eq!(
            stub.exchanges(),
            vec![(
                "4/code".to_string(),
                "https://site/auth/callback".to_string()
            )]
        );

        let state_cookie = response.cookies().find(|c| c.name() == "oauth_state").unwrap();
        assert_eq!(state_cookie.max_age(), Some(Duration::ZERO));

        let session_cookie = response.cookies().find(|c| c.name() == "session").unwrap();
        assert_eq!(session_cookie.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(session_cookie.secure(), Some(true));

        let user = session_manager
            .decode(session_cookie.value())
            .unwrap()
            .unwrap();
        assert_eq!(user, SessionUser::from(test_google_user()));
    }

    #[actix_web::test]
    async fn test_unconfigured_secret_is_server_error() {
        let stub = Arc::new(StubIdentityProvider::signing_in("abc"));
        let req = callback_request(&format!("code=c&state={STATE}"), Some(STATE));

        let response = run(req, &stub, SessionManager::new(None)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.cookies().all(|c| c.name() != "session"));
        assert!(response.cookies().any(|c| c.name() == "oauth_state"));
    }
}
