use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::CookieJar;

use crate::ApiError;

/// Session token from `Authorization: Bearer` or, failing that, the session
/// cookie. Signed cookie values carry a `.signature` suffix that is dropped.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = bearer_token(headers) {
        return Some(token);
    }

    let jar = CookieJar::from_headers(headers);
    let value = jar.get(cookie_name)?.value();
    let token = value.split('.').next().unwrap_or(value);
    (!token.is_empty()).then(|| token.to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    parts.next().map(str::to_string)
}

/// First hop of `x-forwarded-for`, or loopback when absent.
pub fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or("127.0.0.1")
        .to_string()
}

pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    params
        .map(|Query(query)| query)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    const COOKIE_NAME: &str = "eckokit.session_token";

    #[test]
    fn bearer_token_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer TOKEN123"));
        headers.insert(COOKIE, HeaderValue::from_static("eckokit.session_token=other"));

        assert_eq!(session_token(&headers, COOKIE_NAME).as_deref(), Some("TOKEN123"));
    }

    #[test]
    fn cookie_signature_is_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; eckokit.session_token=abc123.c2lnbmF0dXJl"),
        );

        assert_eq!(session_token(&headers, COOKIE_NAME).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_credentials_yield_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

        assert!(session_token(&headers, COOKIE_NAME).is_none());
    }

    #[test]
    fn client_ip_uses_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers), "127.0.0.1");

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }
}
