//! HTTP server command
//!
//! Runs the cofound API server against a local SQLite file.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cofound_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Database file path (default: ~/.cofound/cofound.db)
    #[arg(long, env = "COFOUND_DB")]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_path = args.db_path.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cofound")
            .join("cofound.db")
    });

    tracing::info!("starting cofound server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        db_path,
        timeout_secs: args.timeout,
    };

    // Blocks until shutdown
    run_server(config).await.context("server error")
}
