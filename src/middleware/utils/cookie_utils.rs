use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tower_cookies::{Cookie, Cookies};

use crate::middleware::mw_ctx::JWT_KEY;

/// Session token from the `jwt` cookie, falling back to a bearer header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = CookieJar::from_headers(headers);
    if let Some(cookie) = cookies.get(JWT_KEY) {
        return Some(cookie.value().to_string());
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|bearer| bearer.token().to_string())
}

pub fn issue_session_cookie(cookies: &Cookies, token: &str) {
    cookies.add(
        Cookie::build((JWT_KEY, token.to_string()))
            // without an explicit path the cookie would only apply under /api
            .path("/")
            .http_only(true)
            .into(),
    );
}

pub fn clear_session_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build((JWT_KEY, "")).path("/").into());
}
