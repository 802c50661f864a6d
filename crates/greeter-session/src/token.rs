//! Session tokens: the opaque strings that name a visitor's session.
//!
//! A token is handed to the browser in the session cookie and comes back
//! on every request. The server never parses it; it is only ever used as
//! a key into the [`IdentityRegistry`](crate::IdentityRegistry).

use std::fmt;

/// An opaque session token.
///
/// Tokens minted by [`generate_token`] are random UUIDs, but tokens that
/// arrive from clients can be any string, so the type makes no promise
/// about the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns the token as a string slice (the cookie value).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short prefix of the token, safe to put in logs.
    ///
    /// The full token is a bearer credential, so it never goes to the log.
    pub fn redacted(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Generates a fresh session token: a random (version 4) UUID in
/// lowercase hyphenated form, e.g. `3f2b8c1e-9d4a-4e7b-8f00-5c6d7e8f9a0b`.
///
/// 122 bits come from the operating system's CSPRNG, so a collision with
/// any live token is not a practical concern. If the OS cannot provide
/// randomness the `uuid` crate panics rather than returning a weak
/// value; a reused token would silently merge two sessions.
///
/// Never call this while holding the registry lock.
pub fn generate_token() -> SessionToken {
    SessionToken(uuid::Uuid::new_v4().hyphenated().to_string())
}
