// Pages and health checks that read the session but never change it
use actix_web::{error, http::header::ContentType, web, HttpRequest, HttpResponse};
use askama::Template;

use crate::errors::ConfigError;
use crate::models::{HealthResponse, SessionUser};
use crate::session::SessionManager;
use crate::utils::response_builder::ResponseBuilder;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    user: Option<&'a SessionUser>,
}

/// Home page: greets the signed-in user or offers the sign-in link
///
/// # Errors
///
/// Returns [`ConfigError::SessionSecret`] if a session cookie is presented
/// while the session secret is unset or too short, or a 500 if the page
/// fails to render
pub async fn home(
    req: HttpRequest,
    session_manager: web::Data<SessionManager>,
) -> actix_web::Result<HttpResponse> {
    let user = session_manager.read(&req)?;

    let html = HomeTemplate {
        user: user.as_ref(),
    }
    .render()
    .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

/// Current session user as JSON
///
/// # Errors
///
/// Returns [`ConfigError::SessionSecret`] if a session cookie is presented
/// while the session secret is unset or too short
pub async fn current_user(
    req: HttpRequest,
    session_manager: web::Data<SessionManager>,
) -> Result<HttpResponse, ConfigError> {
    Ok(match session_manager.read(&req)? {
        Some(user) => HttpResponse::Ok().json(user),
        None => ResponseBuilder::unauthorized(),
    })
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "siteauth is running".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{create_test_session_manager, session_request, test_user};
    use actix_web::{body::to_bytes, http::StatusCode, test::TestRequest};

    async fn body_text(response: HttpResponse) -> String {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_home_greets_signed_in_user() {
        let manager = create_test_session_manager();
        let req = session_request(&manager, "/");

        let response = home(req, web::Data::new(manager)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains(&test_user().name));
        assert!(body.contains("/auth/logout"));
    }

    #[test]
    fn test_home_escapes_user_fields() {
        let user = SessionUser {
            id: "1".to_string(),
            email: "eve@example.com".to_string(),
            name: "<script>x</script>".to_string(),
        };
        let html = HomeTemplate { user: Some(&user) }.render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("eve@example.com"));
    }

    #[actix_web::test]
    async fn test_home_anonymous_offers_sign_in() {
        let req = TestRequest::get().uri("/").to_http_request();
        let response = home(req, web::Data::new(create_test_session_manager()))
            .await
            .unwrap();
        let body = body_text(response).await;
        assert!(body.contains("/auth/google"));
    }

    #[actix_web::test]
    async fn test_home_with_cookie_and_no_secret_is_config_error() {
        let req = TestRequest::get()
            .uri("/")
            .cookie(actix_web::cookie::Cookie::new("session", "a.b"))
            .to_http_request();
        let err = home(req, web::Data::new(SessionManager::new(None)))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_error::<ConfigError>(),
            Some(&ConfigError::SessionSecret)
        );
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_current_user() {
        let manager = create_test_session_manager();
        let req = session_request(&manager, "/auth/me");
        let response = current_user(req, web::Data::new(manager.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let user: SessionUser = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(user, test_user());

        let req = TestRequest::get().uri("/auth/me").to_http_request();
        let response = current_user(req, web::Data::new(manager)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_health() {
        let response = health().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"status\":\"ok\""));
    }
}
