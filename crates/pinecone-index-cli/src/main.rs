//! pcindex
//!
//! Command-line client for one remote vector index.
//!
//! # Usage
//!
//! ```bash
//! # Write vectors from a file
//! pcindex --index movies upsert --file vectors.json --namespace films
//!
//! # Ten nearest neighbours of a stored vector
//! pcindex --index movies query --id tt0133093 --top-k 10 --include-metadata
//!
//! # Namespace statistics as JSON
//! pcindex --index movies --format json stats
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: The server rejected the call or could not be reached
//! - 10: Internal error

mod cli;
mod error;

use clap::Parser;
use cli::IndexCli;
use tracing::Level;

fn main() {
    let cli = IndexCli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = cli::run_cli(cli);
    std::process::exit(exit_code.into());
}
