//! Visitor sessions for Greeter.
//!
//! This crate handles who a request is from:
//!
//! 1. **Tokens** - minting opaque session tokens ([`generate_token`])
//! 2. **Registry** - the shared token → identity map ([`IdentityRegistry`])
//! 3. **Names** - deciding which display names are acceptable ([`validate_name`])
//! 4. **Cookies** - carrying the token to and from the browser ([`cookie`])
//! 5. **Resolution and login/logout** - [`SessionManager`]
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP Layer (greeter)  ← routes, templates, axum
//!     ↕   Cookie header values / Set-Cookie values
//! Session Layer (this crate)  ← tokens, registry, login state machine
//! ```
//!
//! Nothing here depends on an HTTP crate.

pub mod cookie;
mod error;
mod manager;
mod name;
mod registry;
mod resolver;
mod session;
mod token;

pub use cookie::{CookieLifetime, SessionCookie};
pub use error::SessionError;
pub use manager::{LoginOutcome, SessionManager};
pub use name::{DisplayName, MAX_NAME_LEN, validate_name};
pub use registry::IdentityRegistry;
pub use resolver::resolve;
pub use session::{Identity, LogoutPolicy, SessionConfig, Visitor};
pub use token::{SessionToken, generate_token};
