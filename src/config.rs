//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

/// Default bind address of the rendering server.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3001";
/// Default base URL the form submits to.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";
/// Default per-attempt submission timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Parser)]
#[command(name = "arrestation")]
#[command(about = "Générateur de rapports d'arrestation au format BBCode", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP rendering server.
    Serve(ServeArgs),
    /// Open the terminal arrest form.
    Form(FormArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "ARRESTATION_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    /// Base URL of the rendering server.
    #[arg(long, env = "ARRESTATION_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding the officer profile and the log file.
    #[arg(long, env = "ARRESTATION_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Per-attempt submission timeout, in seconds.
    #[arg(long, env = "ARRESTATION_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl FormArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
