use axum::http::{HeaderMap, header};

use crate::constants::SESSION_COOKIE;

/// Build the `Set-Cookie` value carrying a session token.
///
/// Attributes are fixed apart from `Secure`, which follows the
/// `server.secure_cookies` config so local HTTP setups still get a cookie.
#[must_use]
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_seconds}"
    );

    if secure {
        cookie.push_str("; Secure");
    }

    cookie
}

/// Build the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Extract the session token from a request's `Cookie` header, if present.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok123", 86400, false);
        assert_eq!(
            cookie,
            "auth-token=tok123; HttpOnly; SameSite=Lax; Path=/; Max-Age=86400"
        );

        let secured = session_cookie("tok123", 2_592_000, true);
        assert!(secured.ends_with("; Secure"));
        assert!(secured.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_clear_session_cookie() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("auth-token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_session_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth-token=abc.def.ghi; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_session_token_absent() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());
    }
}
