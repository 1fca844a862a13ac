//! cofound CLI - backend service for the cofound startup-showcase network
//!
//! The only long-running mode is `serve`, which opens the SQLite
//! database and exposes the HTTP/JSON API.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "cofound",
    author,
    version,
    about = "Backend for the cofound professional networking app",
    long_about = "Serve the cofound HTTP API: user accounts, companies, the post feed, \
                  business cards, subscriptions and favorites, backed by one SQLite file."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(clap::Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up COFOUND_DB and friends from a local .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "cofound",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
