//! Session types: the data structures that describe who a request is from.
//!
//! An [`Identity`] is the server's record of a logged-in visitor: the
//! token their cookie carries and the name they gave. A [`Visitor`] is
//! what a single request resolves to, either one of those identities or
//! nobody in particular.

use crate::{DisplayName, SessionToken};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// What happens to the server-side identity when a visitor logs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutPolicy {
    /// Remove the registry entry for the presented token.
    ///
    /// A client that replays the old cookie value afterwards is anonymous.
    #[default]
    RevokeToken,

    /// Only tell the browser to drop its cookie ("soft logout").
    ///
    /// The registry entry survives, so a replayed token keeps resolving
    /// to the same identity until the process restarts.
    ClearCookieOnly,
}

/// Configuration for session behavior.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Registry handling on logout. Defaults to [`LogoutPolicy::RevokeToken`].
    pub logout_policy: LogoutPolicy,
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A logged-in visitor.
///
/// Created once at login and never modified; the token is the registry
/// key and is unique among live entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: SessionToken,
    pub display_name: DisplayName,
}

// ---------------------------------------------------------------------------
// Visitor
// ---------------------------------------------------------------------------

/// The resolved state of an inbound request.
///
/// ```text
///   Anonymous ──(login with valid name)──→ Authenticated
///       ↑                                       │
///       └───────────────(logout)────────────────┘
/// ```
///
/// Every new client starts out `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Visitor {
    /// No cookie, or a cookie whose token the registry does not know.
    #[default]
    Anonymous,

    /// The cookie's token resolved to a registered identity.
    Authenticated(Identity),
}

impl Visitor {
    /// The visitor's display name, if they are logged in.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Visitor::Anonymous => None,
            Visitor::Authenticated(identity) => {
                Some(identity.display_name.as_str())
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Visitor::Authenticated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_revokes_token() {
        assert_eq!(
            SessionConfig::default().logout_policy,
            LogoutPolicy::RevokeToken
        );
    }

    #[test]
    fn test_visitor_anonymous_has_no_name() {
        let visitor = Visitor::default();
        assert!(!visitor.is_authenticated());
        assert_eq!(visitor.display_name(), None);
    }

    #[test]
    fn test_visitor_authenticated_exposes_name() {
        let visitor = Visitor::Authenticated(Identity {
            token: SessionToken::from("t"),
            display_name: DisplayName::parse("Jane Doe").unwrap(),
        });
        assert!(visitor.is_authenticated());
        assert_eq!(visitor.display_name(), Some("Jane Doe"));
    }
}
