// Helper functions shared by the auth handlers
use actix_web::HttpRequest;

use crate::oauth::CALLBACK_PATH;

/// `scheme://host` of the request as actix resolves it
#[must_use]
pub fn request_origin(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

/// Callback URL registered with the provider, rooted at the request origin
#[must_use]
pub fn callback_redirect_uri(req: &HttpRequest) -> String {
    format!("{}{CALLBACK_PATH}", request_origin(req))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_callback_redirect_uri_from_absolute_uri() {
        let req = TestRequest::get()
            .uri("https://site/auth/google")
            .to_http_request();
        assert_eq!(callback_redirect_uri(&req), "https://site/auth/callback");
    }

    #[test]
    fn test_callback_redirect_uri_from_host_header() {
        let req = TestRequest::get()
            .uri("/auth/google")
            .insert_header(("host", "example.org:8443"))
            .insert_header(("x-forwarded-proto", "https"))
            .to_http_request();
        assert_eq!(
            callback_redirect_uri(&req),
            "https://example.org:8443/auth/callback"
        );
    }
}
