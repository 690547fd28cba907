//! pd - provision and manage Packet bare metal devices.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use packetdeploy::{ApiConfig, Cli, Dispatcher, PacketApi, TerminalPrompt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = ApiConfig::from(&cli.api);
    let api = PacketApi::new(&config).context("Failed to create Packet API client")?;

    let code = Dispatcher::new(&api, TerminalPrompt::default(), io::stdout())
        .run(&cli)
        .await;

    Ok(ExitCode::from(code))
}
