//! # Greeter
//!
//! A minimal web front end that knows visitors by name.
//!
//! A visitor types their first and last name into a form; Greeter mints
//! an opaque session token, remembers the name under it, and hands the
//! token back in a `uuid` cookie. Later requests carrying that cookie are
//! greeted by name. The session logic lives in [`greeter_session`]; this
//! crate is the HTTP side: routes, templates, and the server loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use greeter::prelude::*;
//!
//! # async fn demo() -> Result<(), GreeterError> {
//! let server = GreeterServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
pub mod handler;
mod server;
pub mod templates;

pub use error::GreeterError;
pub use server::{GreeterServer, GreeterServerBuilder};

pub mod prelude {
    pub use crate::error::GreeterError;
    pub use crate::handler::{AppState, NAME_PROMPT};
    pub use crate::server::{GreeterServer, GreeterServerBuilder};
    pub use crate::templates::{TemplateError, Templates};
    pub use greeter_session::{
        Identity, LogoutPolicy, SessionConfig, SessionError, SessionManager,
        Visitor,
    };
}
