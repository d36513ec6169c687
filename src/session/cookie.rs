use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    http::header,
    HttpRequest,
};

/// Cookie names used across the application
pub const SESSION_COOKIE_NAME: &str = "session";
pub const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

/// Ten minutes to complete the provider round trip
pub const OAUTH_STATE_MAX_AGE_SECS: i64 = 60 * 10;

/// Seven days
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Whether cookies issued for this request must carry the `Secure` flag
///
/// Uses the scheme actix resolves for the connection (`Forwarded` and
/// `X-Forwarded-Proto` first, then the request URI, then TLS).
#[must_use]
pub fn is_secure_request(req: &HttpRequest) -> bool {
    req.connection_info().scheme().eq_ignore_ascii_case("https")
}

/// Build a first-party auth cookie: `Path=/`, `HttpOnly`, `SameSite=Lax`
#[must_use]
pub fn build_cookie(
    name: &'static str,
    value: String,
    max_age_secs: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .secure(secure)
        .finish()
}

/// Create an immediately expiring cookie (`Max-Age=0`) to clear `name`
#[must_use]
pub fn create_expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    build_cookie(name, String::new(), 0, secure)
}

/// Read a cookie value from the request by exact name
///
/// Every `Cookie` header is scanned. Unparsable headers and malformed pairs
/// are skipped rather than failing the lookup, and an empty value counts as
/// absent.
#[must_use]
pub fn extract_cookie_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get_all(header::COOKIE)
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie_header| find_cookie_value(cookie_header, name))
        .map(str::to_owned)
}

/// Find `name` in a raw `Cookie` header value
fn find_cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_find_cookie_value_exact_name() {
        let header = "xsession=wrong; session=right; session_extra=nope";
        assert_eq!(find_cookie_value(header, "session"), Some("right"));
        assert_eq!(find_cookie_value(header, "sess"), None);
    }

    #[test]
    fn test_find_cookie_value_tolerates_malformed_pairs() {
        let header = "garbage;; =novalue; oauth_state=abc123 ; broken";
        assert_eq!(find_cookie_value(header, "oauth_state"), Some("abc123"));
        assert_eq!(find_cookie_value("", "oauth_state"), None);
        assert_eq!(find_cookie_value(";;;", "oauth_state"), None);
    }

    #[test]
    fn test_find_cookie_value_empty_is_absent() {
        assert_eq!(find_cookie_value("oauth_state=", "oauth_state"), None);
        assert_eq!(find_cookie_value("oauth_state=; a=b", "oauth_state"), None);
    }

    #[test]
    fn test_find_cookie_value_keeps_equals_in_value() {
        assert_eq!(find_cookie_value("session=a=b.c", "session"), Some("a=b.c"));
    }

    #[test]
    fn test_extract_cookie_value_missing_header() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_cookie_value(&req, SESSION_COOKIE_NAME), None);
    }

    #[test]
    fn test_extract_cookie_value_scans_all_headers() {
        let req = TestRequest::default()
            .append_header((header::COOKIE, "a=1"))
            .append_header((header::COOKIE, "session=xyz"))
            .to_http_request();
        assert_eq!(
            extract_cookie_value(&req, SESSION_COOKIE_NAME),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_secure_follows_scheme() {
        let https = TestRequest::get()
            .uri("https://site.example/auth/google")
            .to_http_request();
        let http = TestRequest::get()
            .uri("http://site.example/auth/google")
            .to_http_request();
        let forwarded = TestRequest::get()
            .uri("/auth/google")
            .insert_header(("x-forwarded-proto", "https"))
            .to_http_request();

        assert!(is_secure_request(&https));
        assert!(!is_secure_request(&http));
        assert!(is_secure_request(&forwarded));
        assert!(!is_secure_request(&TestRequest::default().to_http_request()));
    }

    #[test]
    fn test_build_cookie_attributes() {
        let cookie = build_cookie(OAUTH_STATE_COOKIE_NAME, "v".to_string(), 600, true);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(600)));

        let rendered = cookie.to_string();
        assert!(rendered.starts_with("oauth_state=v"));
        assert!(rendered.contains("Max-Age=600"));
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn test_expired_cookie_has_zero_max_age() {
        let cookie = create_expired_cookie(SESSION_COOKIE_NAME, false);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert!(cookie.to_string().contains("Max-Age=0"));
        assert!(!cookie.to_string().contains("Secure"));
    }
}
