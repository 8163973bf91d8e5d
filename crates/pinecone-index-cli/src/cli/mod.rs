//! CLI module for pcindex
//!
//! Builds a blocking index client from flags, the environment and an
//! optional TOML file, runs one operation and renders the result.

pub mod commands;
pub mod output;

pub use commands::IndexCli;

use colored::Colorize;
use pinecone_index::{BlockingIndex, ClientConfig, Index, OpenApiConfig, TransportOptions};
use std::io;
use std::time::Duration;

use crate::error::CliError;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed
    Success = 0,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// The server rejected the call or could not be reached
    RemoteError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: IndexCli) -> Result<ExitCode, CliError> {
    let index = connect(&cli)?;
    let options = transport_options(&cli);

    let outcome = commands::execute(&index, cli.command, options)?;

    let stdout = io::stdout();
    outcome.render(cli.format, &mut stdout.lock())?;
    Ok(ExitCode::Success)
}

/// Run the CLI, reporting any error on stderr
pub fn run_cli(cli: IndexCli) -> ExitCode {
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            e.exit_code()
        }
    }
}

/// Flags win over the environment, which wins over the config file
pub fn client_config(cli: &IndexCli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(environment) = &cli.environment {
        config.environment = environment.clone();
    }
    if let Some(project) = &cli.project {
        config.project_name = Some(project.clone());
    }
    Ok(config)
}

fn connect(cli: &IndexCli) -> Result<BlockingIndex, CliError> {
    let mut openapi = OpenApiConfig::default();
    if let Some(host) = &cli.host {
        openapi = openapi.with_host(host.clone());
    }

    let index = Index::builder(cli.index.clone())
        .defaults(client_config(cli)?)
        .openapi_config(openapi)
        .pool_threads(cli.pool_threads)
        .build_blocking()?;

    tracing::info!(index = %cli.index, pool_threads = cli.pool_threads, "Built index client");
    Ok(index)
}

fn transport_options(cli: &IndexCli) -> TransportOptions {
    match cli.timeout_ms {
        Some(ms) => TransportOptions::new().timeout(Duration::from_millis(ms)),
        None => TransportOptions::new(),
    }
}
