//! CLI command implementations
//!
//! Boot sequence for `serve`:
//! 1. Load configuration (defaults, file, environment/flags)
//! 2. Install the log subscriber
//! 3. Connect the store and create the items table
//! 4. Serve until a shutdown signal
//! 5. Close the store

use std::io;
use std::path::Path;

use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::http_server::{HttpServer, ServiceConfig};
use crate::observability::init_logging;
use crate::storage::ItemStore;

use super::args::{Command, ServeArgs, StoreArgs};
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(&args),
        Command::Init(args) => init(&args),
    }
}

/// Build the effective configuration: defaults, then the optional file,
/// then command line and environment overrides.
pub fn load_config(
    path: Option<&Path>,
    apply: impl FnOnce(&mut ServiceConfig),
) -> CliResult<ServiceConfig> {
    let mut config = match path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    apply(&mut config);
    config.validate()?;

    Ok(config)
}

/// Create the items table and exit
pub fn init(args: &StoreArgs) -> CliResult<()> {
    let config = load_config(args.config.as_deref(), |c| args.apply(c))?;
    init_logging(&config.log_filter);

    runtime()?.block_on(async {
        let store = ItemStore::connect(&config.database_url, config.max_connections).await?;
        store.bootstrap().await?;
        store.close().await?;
        Ok::<(), CliError>(())
    })
}

/// Boot the store and serve the HTTP API until shutdown
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = load_config(args.store.config.as_deref(), |c| args.apply(c))?;
    init_logging(&config.log_filter);
    info!(addr = %config.socket_addr(), "Configuration loaded");

    runtime()?.block_on(async {
        let store = ItemStore::connect(&config.database_url, config.max_connections).await?;
        store.bootstrap().await?;

        let server = HttpServer::new(config, store.clone());
        let served = server.start().await;

        shut_down(store, served).await
    })
}

/// Close the store after serving. The serve outcome takes precedence over a
/// failed close, which is only logged.
async fn shut_down(store: ItemStore, served: io::Result<()>) -> CliResult<()> {
    if let Err(e) = store.close().await {
        warn!(error = %e, "Failed to close item store");
    }

    served.map_err(|e| CliError::serve_failed(e.to_string()))
}

fn runtime() -> CliResult<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))
}
