//! Cookie transport: moving a session token to and from the browser.
//!
//! The session cookie is the only place session state lives on the
//! client. Its wire contract is fixed:
//!
//! ```text
//! login:   Set-Cookie: uuid=<token>; Path=/; HttpOnly
//! logout:  Set-Cookie: uuid=deleted; Path=/; Max-Age=0;
//!                      Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly
//! request: Cookie: ...; uuid=<token>; ...
//! ```
//!
//! This module deals only in header *values* (`&str`), so it does not
//! depend on any HTTP crate.

use std::fmt;

use crate::SessionToken;

/// Name of the session cookie.
pub const COOKIE_NAME: &str = "uuid";

/// Path the session cookie is scoped to.
pub const COOKIE_PATH: &str = "/";

/// Value written over the token when the cookie is revoked.
pub const REVOKED_VALUE: &str = "deleted";

/// A date safely in the past, for clients that ignore `Max-Age`.
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// How long the browser should keep the cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieLifetime {
    /// No explicit lifetime: the browser keeps it for its session.
    Session,

    /// Discard immediately on receipt.
    ExpireNow,
}

/// A `Set-Cookie` instruction for the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: &'static str,
    pub value: String,
    pub path: &'static str,
    pub lifetime: CookieLifetime,
}

impl SessionCookie {
    /// Renders the cookie as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        self.to_string()
    }

    /// Returns `true` if the browser will drop this cookie on receipt.
    pub fn expires_immediately(&self) -> bool {
        self.lifetime == CookieLifetime::ExpireNow
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, self.value, self.path)?;
        if self.lifetime == CookieLifetime::ExpireNow {
            write!(f, "; Max-Age=0; Expires={EPOCH_EXPIRES}")?;
        }
        f.write_str("; HttpOnly")
    }
}

/// Builds the cookie that carries a freshly issued token.
pub fn issue(token: &SessionToken) -> SessionCookie {
    SessionCookie {
        name: COOKIE_NAME,
        value: token.as_str().to_string(),
        path: COOKIE_PATH,
        lifetime: CookieLifetime::Session,
    }
}

/// Builds the cookie that makes the browser forget its token.
pub fn revoke() -> SessionCookie {
    SessionCookie {
        name: COOKIE_NAME,
        value: REVOKED_VALUE.to_string(),
        path: COOKIE_PATH,
        lifetime: CookieLifetime::ExpireNow,
    }
}

/// Reads the session token out of one or more `Cookie` request headers.
///
/// Returns the first non-empty `uuid` value that is not the revocation
/// sentinel. No header, no `uuid` pair, or only a `deleted` value all
/// mean "no token" rather than an error.
pub fn extract_token<'a, I>(cookie_headers: I) -> Option<SessionToken>
where
    I: IntoIterator<Item = &'a str>,
{
    cookie_headers
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .filter(|(name, _)| name.trim() == COOKIE_NAME)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .find(|value| !value.is_empty() && *value != REVOKED_VALUE)
        .map(SessionToken::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // issue() / revoke()
    // =====================================================================

    #[test]
    fn test_issue_carries_token_with_session_lifetime() {
        let cookie = issue(&SessionToken::from("abc-123"));

        assert_eq!(cookie.name, "uuid");
        assert_eq!(cookie.value, "abc-123");
        assert_eq!(cookie.path, "/");
        assert!(!cookie.expires_immediately());
        assert_eq!(cookie.to_header_value(), "uuid=abc-123; Path=/; HttpOnly");
    }

    #[test]
    fn test_revoke_uses_sentinel_and_expires_now() {
        let cookie = revoke();

        assert_eq!(cookie.name, "uuid");
        assert_eq!(cookie.value, "deleted");
        assert_eq!(cookie.path, "/");
        assert!(cookie.expires_immediately());
        assert_eq!(
            cookie.to_header_value(),
            "uuid=deleted; Path=/; Max-Age=0; \
             Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly"
        );
    }

    #[test]
    fn test_issue_then_revoke_expiry_independent_of_token() {
        for token in ["a", "9b2f0c1e-0000-4000-8000-000000000000", "x y"] {
            let issued = issue(&SessionToken::from(token));
            assert!(!issued.expires_immediately());

            let revoked = revoke();
            assert!(revoked.expires_immediately());
            assert_eq!(revoked.value, REVOKED_VALUE);
            assert_eq!(revoked.name, issued.name);
            assert_eq!(revoked.path, issued.path);
        }
    }

    // =====================================================================
    // extract_token()
    // =====================================================================

    #[test]
    fn test_extract_token_no_header_returns_none() {
        assert_eq!(extract_token(std::iter::empty()), None);
    }

    #[test]
    fn test_extract_token_single_pair() {
        let token = extract_token(["uuid=abc-123"]);
        assert_eq!(token, Some(SessionToken::from("abc-123")));
    }

    #[test]
    fn test_extract_token_among_other_cookies() {
        let token = extract_token(["theme=dark; uuid=abc-123; lang=en"]);
        assert_eq!(token, Some(SessionToken::from("abc-123")));
    }

    #[test]
    fn test_extract_token_across_multiple_headers() {
        let token = extract_token(["theme=dark", "uuid=abc-123"]);
        assert_eq!(token, Some(SessionToken::from("abc-123")));
    }

    #[test]
    fn test_extract_token_ignores_similar_names() {
        assert_eq!(extract_token(["uuid2=x; xuuid=y"]), None);
    }

    #[test]
    fn test_extract_token_revoked_sentinel_returns_none() {
        assert_eq!(extract_token(["uuid=deleted"]), None);
    }

    #[test]
    fn test_extract_token_empty_value_returns_none() {
        assert_eq!(extract_token(["uuid="]), None);
    }

    #[test]
    fn test_extract_token_strips_quotes() {
        let token = extract_token(["uuid=\"abc\""]);
        assert_eq!(token, Some(SessionToken::from("abc")));
    }
}
