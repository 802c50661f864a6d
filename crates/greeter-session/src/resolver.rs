//! Session resolution: turning an inbound request into a [`Visitor`].

use crate::{IdentityRegistry, Visitor, cookie};

/// Resolves the `Cookie` headers of a request to a [`Visitor`].
///
/// Extracts the session token and looks it up. A missing cookie and a
/// token the registry doesn't know (for example, one issued before a
/// restart) both come back as [`Visitor::Anonymous`]; callers only ever
/// branch on "have a name" versus "don't".
pub fn resolve<'a, I>(registry: &IdentityRegistry, cookie_headers: I) -> Visitor
where
    I: IntoIterator<Item = &'a str>,
{
    let Some(token) = cookie::extract_token(cookie_headers) else {
        return Visitor::Anonymous;
    };

    match registry.lookup(&token) {
        Some(identity) => Visitor::Authenticated(identity),
        None => {
            tracing::debug!(token = token.redacted(), "stale session token");
            Visitor::Anonymous
        }
    }
}
