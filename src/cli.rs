// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use reimager::output::OutputMode;
use reimager::types::DeploymentSlot;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reimager")]
#[command(about = "Reimage or reboot every instance of a hosted service")]
#[command(version)]
pub struct Cli {
    /// Settings file (default: reimager.yml in the current directory, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print progress as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Which hosted service to act on and how to authenticate.
#[derive(Args)]
pub struct ServiceArgs {
    /// Subscription that owns the hosted service
    pub subscription_id: String,

    /// PEM file holding the management certificate and its private key
    pub certificate_file: PathBuf,

    /// Hosted service name
    pub service_name: String,

    /// Deployment slot: production or staging (overrides the settings file)
    #[arg(long)]
    pub slot: Option<DeploymentSlot>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reimage instances one at a time, waiting for each to come back
    Reimage(ServiceArgs),

    /// Reimage all instances at once, then wait for the whole batch
    ReimageAsync(ServiceArgs),

    /// Reboot instances one at a time
    Reboot {
        #[command(flatten)]
        service: ServiceArgs,

        /// Only reboot the instance with this name
        #[arg(long)]
        instance: Option<String>,
    },
}
