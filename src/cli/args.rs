//! CLI argument definitions using clap
//!
//! Commands:
//! - itemstore serve [--config <path>] [--host] [--port] [--database-url] [--cors-origin]...
//! - itemstore init [--config <path>] [--database-url]
//!
//! Every override can also come from the environment (or a `.env` file).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::http_server::ServiceConfig;

/// itemstore - a small record-keeping HTTP service for to-do items
#[derive(Parser, Debug)]
#[command(name = "itemstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the items table and start serving the HTTP API
    Serve(ServeArgs),

    /// Create the items table and exit
    Init(StoreArgs),
}

/// Options shared by every command that touches the store
#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database connection URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long, env = "MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Allowed cross-origin caller; repeat or comma-separate for several
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl StoreArgs {
    /// Overwrite config values with the ones given on the command line
    pub fn apply(&self, config: &mut ServiceConfig) {
        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
    }
}

impl ServeArgs {
    pub fn apply(&self, config: &mut ServiceConfig) {
        self.store.apply(config);
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if !self.cors_origins.is_empty() {
            config.cors_origins = self
                .cors_origins
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
