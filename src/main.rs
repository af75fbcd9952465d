// ABOUTME: Entry point for the reimager CLI application.
// ABOUTME: Parses arguments, wires cancellation, and dispatches to command handlers.

mod cli;
mod commands;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use reimager::config::Settings;
use reimager::error::Result;
use reimager::orchestrate::ExecutionMode;
use reimager::output::Output;
use std::env;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not failures; every usage error exits 1.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // RUST_LOG wins, then --verbose. Run warnings are printed by Output, not the log.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("error")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let mode = cli.output_mode();
    if let Err(e) = run(cli, cancel).await {
        Output::new(mode).error(&e.to_string());
        if e.is_usage() {
            eprintln!("{}", Cli::command().render_usage());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cancel: CancellationToken) -> Result<()> {
    let output = Output::new(cli.output_mode());
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::discover(&env::current_dir()?)?,
    };

    match cli.command {
        Commands::Reimage(args) => {
            commands::reimage(&settings, args, ExecutionMode::Sequential, output, cancel).await
        }
        Commands::ReimageAsync(args) => {
            commands::reimage(&settings, args, ExecutionMode::Batched, output, cancel).await
        }
        Commands::Reboot { service, instance } => {
            commands::reboot(&settings, service, instance, output, cancel).await
        }
    }
}

/// First Ctrl-C stops the run at the next poll; a second one exits immediately.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        eprintln!("Interrupted: stopping at the next poll (Ctrl-C again to exit now)");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}
