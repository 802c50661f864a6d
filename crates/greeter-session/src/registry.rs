//! The identity registry: which token belongs to which visitor.
//!
//! # Concurrency note
//!
//! Unlike most of the session layer, the registry is shared by every
//! request task at once, so it owns its lock. It is a readers-writer
//! lock: any number of lookups run together, while an insert or remove
//! excludes everyone else. Each critical section is a single map access.
//! Tokens are generated and logs are written before or after taking the
//! lock, never while holding it. Nothing awaits while locked.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::{Identity, SessionToken};

/// Process-wide map from session token to [`Identity`].
///
/// Held in memory only: entries live until they are removed or the
/// process exits. Share it as `Arc<IdentityRegistry>`.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    identities: RwLock<HashMap<SessionToken, Identity>>,
}

impl IdentityRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the identity registered under `token`.
    ///
    /// Returns `None` if the token was never registered (or was removed).
    pub fn lookup(&self, token: &SessionToken) -> Option<Identity> {
        self.identities.read().get(token).cloned()
    }

    /// Registers `identity` under its own token.
    ///
    /// Overwrites any existing entry for the same token and returns it.
    pub fn insert(&self, identity: Identity) -> Option<Identity> {
        let token = identity.token.clone();
        self.identities.write().insert(token, identity)
    }

    /// Removes the entry for `token`, returning it if it existed.
    pub fn remove(&self, token: &SessionToken) -> Option<Identity> {
        self.identities.write().remove(token)
    }

    /// Returns the number of registered identities.
    pub fn len(&self) -> usize {
        self.identities.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.identities.read().is_empty()
    }
}
