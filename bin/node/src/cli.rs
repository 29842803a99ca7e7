//! Contains the sable-node CLI.

use crate::{
    commands::{CheckForkIdCommand, ForkIdCommand, ForksCommand},
    flags::GlobalArgs,
};
use clap::{Parser, Subcommand};
use sable_cli::{cli_styles, init_tracing_subscriber};

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Computes the local fork ID at a head block.
    #[command(name = "forkid")]
    ForkId(ForkIdCommand),
    /// Checks a remote fork ID against the local fork schedule.
    #[command(name = "check-forkid")]
    CheckForkId(CheckForkIdCommand),
    /// Prints the fork schedule.
    Forks(ForksCommand),
}

/// The sable-node CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing_subscriber(self.global.log_args.level(), None::<String>)?;

        match self.subcommand {
            Commands::ForkId(cmd) => cmd.run(&self.global),
            Commands::CheckForkId(cmd) => cmd.run(&self.global),
            Commands::Forks(cmd) => cmd.run(&self.global),
        }
    }
}
