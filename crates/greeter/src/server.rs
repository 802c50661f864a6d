//! `GreeterServer` builder and server loop.
//!
//! This is the entry point for running a Greeter site. It ties together
//! the layers: listener → axum router → handlers → session manager.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use greeter_session::{SessionConfig, SessionManager};
use tokio::net::TcpListener;

use crate::handler::{AppState, router};
use crate::templates::Templates;
use crate::GreeterError;

/// Builder for configuring and starting a Greeter server.
///
/// # Example
///
/// ```rust,no_run
/// use greeter::prelude::*;
///
/// # async fn demo() -> Result<(), GreeterError> {
/// let server = GreeterServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GreeterServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
    templates_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
}

impl GreeterServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            session_config: SessionConfig::default(),
            templates_dir: None,
            static_dir: None,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Loads page templates from a directory instead of the built-ins.
    pub fn templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }

    /// Serves the files in `dir` under `/static`.
    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Loads templates and binds the listener.
    ///
    /// # Errors
    /// Fails if the template directory can't be read or the address
    /// can't be bound.
    pub async fn build(self) -> Result<GreeterServer, GreeterError> {
        let templates = match &self.templates_dir {
            Some(dir) => Templates::load(dir)?,
            None => Templates::builtin(),
        };

        let state = AppState {
            sessions: SessionManager::new(self.session_config),
            templates: Arc::new(templates),
        };
        let router = router(state.clone(), self.static_dir.as_deref());

        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "listening");

        Ok(GreeterServer {
            listener,
            router,
            state,
        })
    }
}

impl Default for GreeterServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Greeter server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct GreeterServer {
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl GreeterServer {
    /// Creates a new builder.
    pub fn builder() -> GreeterServerBuilder {
        GreeterServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The session manager shared by all handlers.
    pub fn sessions(&self) -> &SessionManager {
        &self.state.sessions
    }

    /// A clone of the application router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves requests until Ctrl-C.
    ///
    /// Every request runs on its own Tokio task. The identity registry is
    /// the only state they share.
    pub async fn run(self) -> Result<(), GreeterError> {
        tracing::info!("Greeter server running");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Greeter server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
