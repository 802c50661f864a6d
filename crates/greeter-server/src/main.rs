//! Greeter server binary.
//!
//! Parses flags, sets up logging, and runs the site until Ctrl-C.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use greeter::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Greeter - greets visitors by name
#[derive(Debug, Parser)]
#[command(name = "greeter")]
#[command(about = "Greeter - a tiny web front end that greets visitors by name", long_about = None)]
#[command(version)]
struct Cli {
    /// Port the web server binds to
    #[arg(short, long, env = "GREETER_PORT", default_value_t = 8080)]
    port: u16,

    /// Interface the web server binds to
    #[arg(long, env = "GREETER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory of *.html templates overriding the built-in pages
    #[arg(long, env = "GREETER_TEMPLATES")]
    templates: Option<PathBuf>,

    /// Directory served under /static
    #[arg(long, env = "GREETER_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// What logout does to the server-side session
    #[arg(long, value_enum, default_value_t = LogoutArg::Revoke)]
    logout_policy: LogoutArg,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "GREETER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "GREETER_LOG_JSON")]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogoutArg {
    /// Forget the session token on the server as well
    Revoke,
    /// Only expire the browser cookie
    Soft,
}

impl From<LogoutArg> for LogoutPolicy {
    fn from(arg: LogoutArg) -> Self {
        match arg {
            LogoutArg::Revoke => LogoutPolicy::RevokeToken,
            LogoutArg::Soft => LogoutPolicy::ClearCookieOnly,
        }
    }
}

impl Cli {
    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), GreeterError> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut builder = GreeterServerBuilder::new()
        .bind(&cli.bind_addr())
        .session_config(SessionConfig {
            logout_policy: cli.logout_policy.into(),
        });
    if let Some(dir) = &cli.templates {
        builder = builder.templates_dir(dir);
    }
    if let Some(dir) = &cli.static_dir {
        builder = builder.static_dir(dir);
    }

    let server = builder.build().await?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        logout_policy = ?cli.logout_policy,
        "starting greeter"
    );

    server.run().await
}
