//! CLI command definitions.

pub mod login;
pub mod orders;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Default location of the durable session file.
pub const DEFAULT_STORE_PATH: &str = ".pizzadash/storage.json";

/// PizzaDash admin dashboard.
#[derive(Debug, Parser)]
#[command(name = "pizzadash")]
#[command(version, about = "PizzaDash admin dashboard", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// File holding the signed-in user.
    #[arg(long, global = true, env = "PIZZADASH_STORE_PATH", default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Keep the session in memory only, for this run.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with Google.
    Login(login::LoginArgs),
    /// Sign out and forget the stored user.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Dashboard summary (requires a session).
    Dashboard,
    /// Pizza orders (requires a session).
    Orders(orders::OrdersCommand),
    /// Show resolved configuration (development mode only).
    Config,
    /// Explain an error code returned by the identity provider.
    AuthError {
        /// Provider error code, e.g. `AccessDenied`.
        #[arg(long)]
        error: Option<String>,
    },
    /// Run the mock identity provider.
    #[cfg(feature = "mock-idp")]
    MockIdp {
        /// Port to listen on.
        #[arg(long, short, default_value = "3001", env = "MOCK_IDP_PORT")]
        port: u16,
    },
}
