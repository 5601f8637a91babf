//! Operator CLI for the sotto anonymous relay.
//!
//! Inspects the disclosure ledger offline and runs the liveness probe.
//! The relay itself runs embedded in a gateway host that implements
//! the `sotto_core::effects` traits.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod probe;

#[derive(Parser)]
#[command(name = "sotto")]
#[command(about = "Anonymous message relay - operator tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ledger document path
    #[arg(short, long, global = true, default_value = "data/ledger.json")]
    ledger: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ledger status: counter, entry count, burned ids
    Status,

    /// Print the recorded author and content for a message number
    Reveal {
        /// Message number to reveal
        id: u64,
    },

    /// Run the liveness probe endpoint
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Validate the process environment the way the relay's startup does
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match cli.command {
        Commands::Status => commands::status(&cli.ledger).await?,
        Commands::Reveal { id } => commands::reveal(&cli.ledger, id).await?,
        Commands::Serve { port } => probe::serve(cli.ledger, port).await?,
        Commands::CheckConfig => commands::check_config()?,
    }

    Ok(())
}
