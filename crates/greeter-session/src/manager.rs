//! The session manager: the login/logout state machine.
//!
//! This is the piece request handlers talk to. It wires the other parts
//! of the crate together:
//! - Login: validate the name, mint a token, register it, issue a cookie
//! - Logout: revoke the cookie (and, by default, the registry entry)
//! - Resolve: map a request's cookies to a [`Visitor`]
//!
//! # Concurrency note
//!
//! `SessionManager` is cheap to clone and every clone shares the same
//! [`IdentityRegistry`]. Handlers running on different Tokio tasks each
//! hold a clone; the registry's own lock is the only synchronization.

use std::sync::Arc;

use crate::{
    DisplayName, Identity, IdentityRegistry, LogoutPolicy, SessionConfig,
    SessionCookie, SessionError, Visitor, cookie, generate_token, resolver,
};

/// The result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The identity that was just registered.
    pub identity: Identity,

    /// The cookie to attach to the response.
    pub cookie: SessionCookie,
}

/// Drives the visitor session lifecycle.
///
/// ```text
/// login(valid name)   ──→ [Authenticated]   registry entry + Set-Cookie
/// login(invalid name) ──→ [Anonymous]       InvalidName, nothing mutated
/// logout()            ──→ [Anonymous]       revoked Set-Cookie
/// resolve()           ──→ read only
/// ```
#[derive(Debug, Clone)]
pub struct SessionManager {
    registry: Arc<IdentityRegistry>,
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a manager with its own, empty registry.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_registry(Arc::new(IdentityRegistry::new()), config)
    }

    /// Creates a manager over an existing registry.
    pub fn with_registry(
        registry: Arc<IdentityRegistry>,
        config: SessionConfig,
    ) -> Self {
        Self { registry, config }
    }

    /// The registry this manager reads and writes.
    pub fn registry(&self) -> &Arc<IdentityRegistry> {
        &self.registry
    }

    /// Logs a visitor in under the name they submitted.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidName`] if the name is rejected. No
    /// token is generated and the registry is untouched in that case.
    pub fn login(&self, candidate: &str) -> Result<LoginOutcome, SessionError> {
        let display_name = DisplayName::parse(candidate)?;

        let token = generate_token();
        let identity = Identity {
            token: token.clone(),
            display_name,
        };

        if self.registry.insert(identity.clone()).is_some() {
            // Only reachable if the RNG repeated itself.
            tracing::warn!(token = token.redacted(), "session token overwritten");
        }

        tracing::info!(token = token.redacted(), "visitor logged in");
        tracing::debug!(name = %identity.display_name, "registered display name");

        Ok(LoginOutcome {
            cookie: cookie::issue(&token),
            identity,
        })
    }

    /// Logs a visitor out and returns the cookie that clears their token.
    ///
    /// Under [`LogoutPolicy::RevokeToken`] the presented token is also
    /// removed from the registry. Logging out without a cookie is fine:
    /// the revoked cookie is returned either way.
    pub fn logout<'a, I>(&self, cookie_headers: I) -> SessionCookie
    where
        I: IntoIterator<Item = &'a str>,
    {
        let token = cookie::extract_token(cookie_headers);

        match (self.config.logout_policy, token) {
            (LogoutPolicy::RevokeToken, Some(token)) => {
                let removed = self.registry.remove(&token);
                tracing::info!(
                    token = token.redacted(),
                    known = removed.is_some(),
                    "visitor logged out, token revoked"
                );
            }
            (LogoutPolicy::ClearCookieOnly, Some(token)) => {
                tracing::info!(
                    token = token.redacted(),
                    "visitor logged out, token retained"
                );
            }
            (_, None) => {
                tracing::debug!("logout without a session cookie");
            }
        }

        cookie::revoke()
    }

    /// Resolves a request's `Cookie` headers to a [`Visitor`].
    pub fn resolve<'a, I>(&self, cookie_headers: I) -> Visitor
    where
        I: IntoIterator<Item = &'a str>,
    {
        resolver::resolve(&self.registry, cookie_headers)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionManager`.
    //!
    //! Naming convention: `test_{function}_{scenario}_{expected}`.

    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn soft_logout_manager() -> SessionManager {
        SessionManager::new(SessionConfig {
            logout_policy: LogoutPolicy::ClearCookieOnly,
        })
    }

    /// The `Cookie` request header a browser would send back.
    fn cookie_header(outcome: &LoginOutcome) -> String {
        format!("{}={}", outcome.cookie.name, outcome.cookie.value)
    }

    // =====================================================================
    // login()
    // =====================================================================

    #[test]
    fn test_login_valid_name_registers_identity() {
        let mgr = SessionManager::default();

        let outcome = mgr.login("Jane Doe").expect("valid name");

        assert_eq!(outcome.identity.display_name.as_str(), "Jane Doe");
        assert_eq!(outcome.cookie.value, outcome.identity.token.as_str());
        assert!(!outcome.cookie.expires_immediately());
        assert_eq!(
            mgr.registry().lookup(&outcome.identity.token),
            Some(outcome.identity.clone())
        );
    }

    #[test]
    fn test_login_invalid_name_leaves_registry_untouched() {
        let mgr = SessionManager::default();

        let result = mgr.login("Madonna");

        assert!(matches!(result, Err(SessionError::InvalidName(_))));
        assert!(mgr.registry().is_empty());
    }

    #[test]
    fn test_login_twice_same_name_gets_distinct_tokens() {
        let mgr = SessionManager::default();

        let a = mgr.login("Jane Doe").unwrap();
        let b = mgr.login("Jane Doe").unwrap();

        assert_ne!(a.identity.token, b.identity.token);
        assert_eq!(mgr.registry().len(), 2);
    }

    #[test]
    fn test_login_normalizes_name() {
        let mgr = SessionManager::default();

        let outcome = mgr.login("  Jane   Doe ").unwrap();

        assert_eq!(outcome.identity.display_name.as_str(), "Jane Doe");
    }

    // =====================================================================
    // resolve()
    // =====================================================================

    #[test]
    fn test_resolve_after_login_is_authenticated() {
        let mgr = SessionManager::default();
        let outcome = mgr.login("Jane Doe").unwrap();
        let header = cookie_header(&outcome);

        let visitor = mgr.resolve([header.as_str()]);

        assert_eq!(visitor, Visitor::Authenticated(outcome.identity));
    }

    #[test]
    fn test_with_registry_shares_existing_entries() {
        let registry = Arc::new(IdentityRegistry::new());
        let first = SessionManager::with_registry(
            Arc::clone(&registry),
            SessionConfig::default(),
        );
        let second = SessionManager::with_registry(
            Arc::clone(&registry),
            SessionConfig {
                logout_policy: LogoutPolicy::ClearCookieOnly,
            },
        );
        let outcome = first.login("Jane Doe").unwrap();
        let header = cookie_header(&outcome);

        assert_eq!(
            second.resolve([header.as_str()]).display_name(),
            Some("Jane Doe")
        );
        assert_eq!(registry.len(), 1);

        // Soft logout through the second manager keeps the shared entry.
        second.logout([header.as_str()]);
        assert!(first.resolve([header.as_str()]).is_authenticated());
    }

    #[test]
    fn test_resolve_shared_across_clones() {
        let mgr = SessionManager::default();
        let other = mgr.clone();
        let outcome = mgr.login("Jane Doe").unwrap();
        let header = cookie_header(&outcome);

        assert!(other.resolve([header.as_str()]).is_authenticated());
    }

    // =====================================================================
    // logout()
    // =====================================================================

    #[test]
    fn test_logout_returns_revoked_cookie() {
        let mgr = SessionManager::default();

        let cookie = mgr.logout(std::iter::empty());

        assert!(cookie.expires_immediately());
        assert_eq!(cookie.value, "deleted");
    }

    #[test]
    fn test_logout_revoke_policy_stale_token_is_anonymous() {
        let mgr = SessionManager::default();
        let outcome = mgr.login("Jane Doe").unwrap();
        let header = cookie_header(&outcome);

        mgr.logout([header.as_str()]);

        // Replaying the old cookie no longer works.
        assert_eq!(mgr.resolve([header.as_str()]), Visitor::Anonymous);
        assert!(mgr.registry().is_empty());
    }

    #[test]
    fn test_logout_soft_policy_stale_token_still_resolves() {
        let mgr = soft_logout_manager();
        let outcome = mgr.login("Jane Doe").unwrap();
        let header = cookie_header(&outcome);

        let cookie = mgr.logout([header.as_str()]);

        assert!(cookie.expires_immediately());
        assert_eq!(
            mgr.resolve([header.as_str()]).display_name(),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_logout_only_revokes_presented_token() {
        let mgr = SessionManager::default();
        let jane = mgr.login("Jane Doe").unwrap();
        let john = mgr.login("John Roe").unwrap();

        mgr.logout([cookie_header(&jane).as_str()]);

        let john_header = cookie_header(&john);
        assert_eq!(
            mgr.resolve([john_header.as_str()]).display_name(),
            Some("John Roe")
        );
    }

    // =====================================================================
    // Full lifecycle
    // =====================================================================

    #[test]
    fn test_full_lifecycle_login_resolve_logout() {
        let mgr = SessionManager::default();

        // 1. New client: no cookie, anonymous.
        assert_eq!(mgr.resolve(std::iter::empty()), Visitor::Anonymous);

        // 2. Bad name: still anonymous, nothing stored.
        assert!(mgr.login("").is_err());
        assert!(mgr.registry().is_empty());

        // 3. Good name: authenticated via the issued cookie.
        let outcome = mgr.login("Jane Doe").unwrap();
        let header = cookie_header(&outcome);
        assert!(mgr.resolve([header.as_str()]).is_authenticated());

        // 4. Logout: browser gets a revoked cookie and sends nothing back.
        let revoked = mgr.logout([header.as_str()]);
        assert!(revoked.expires_immediately());
        assert_eq!(mgr.resolve(std::iter::empty()), Visitor::Anonymous);
    }
}
