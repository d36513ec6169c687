use actix_web::{cookie::Cookie, http::header, HttpResponse};
use serde_json::json;

use crate::errors::ConfigError;

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Create a 302 redirect response carrying every given cookie
    #[must_use]
    pub fn redirect(location: &str, cookies: Vec<Cookie<'static>>) -> HttpResponse {
        let mut builder = HttpResponse::Found();

        for cookie in cookies {
            builder.cookie(cookie);
        }

        builder
            .insert_header((header::LOCATION, location))
            .finish()
    }

    /// Create a redirect response with a single cookie
    #[must_use]
    pub fn redirect_with_cookie(location: &str, cookie: Cookie<'static>) -> HttpResponse {
        Self::redirect(location, vec![cookie])
    }

    /// 500 response for a configuration error; only the operator-facing message is exposed
    #[must_use]
    pub fn configuration_error(error: &ConfigError, cookies: Vec<Cookie<'static>>) -> HttpResponse {
        let mut builder = HttpResponse::InternalServerError();

        for cookie in cookies {
            builder.cookie(cookie);
        }

        builder.json(json!({
            "error": "configuration_error",
            "message": error.to_string(),
        }))
    }

    #[must_use]
    pub fn unauthorized() -> HttpResponse {
        HttpResponse::Unauthorized().json(json!({
            "error": "unauthorized",
            "error_description": "Authentication is required to access this resource",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_redirect_sets_location_and_cookies() {
        let response = ResponseBuilder::redirect(
            "/",
            vec![Cookie::new("a", "1"), Cookie::new("b", "2")],
        );

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
        let names: Vec<String> = response.cookies().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_configuration_error_keeps_cookies() {
        let response = ResponseBuilder::configuration_error(
            &ConfigError::SessionSecret,
            vec![Cookie::new("oauth_state", "")],
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.cookies().count(), 1);
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            ResponseBuilder::unauthorized().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
