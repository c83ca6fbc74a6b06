//! Session display endpoint
//!
//! Sessions are issued by the external auth service; this endpoint only
//! resolves the cookie so the page header can show who is signed in.
//! It never gates anything — every failure mode degrades to anonymous.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;
use upkeep_common::session::resolve_session;

use crate::AppState;

const SESSION_COOKIE: &str = "upkeep_session";

/// GET /api/session
///
/// Resolves the session cookie against the console database. Returns the
/// operator's display name, or 204 when there is no usable session.
pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match resolve_session(&state.db, &token).await {
        Ok(Some(session)) => Json(json!({ "user_name": session.user_name })).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            // Display-only data; render anonymously rather than failing
            warn!("Session lookup failed: {}", e);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Extract the session token from the Cookie header
fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_token_extracted_from_cookie() {
        let headers = headers_with_cookie("upkeep_session=abc-123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_token_found_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; upkeep_session=abc-123; lang=en");
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_no_cookie_header_yields_none() {
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_unrelated_cookies_yield_none() {
        let headers = headers_with_cookie("theme=dark; lang=en");
        assert!(session_token(&headers).is_none());
    }
}
