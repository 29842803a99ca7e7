#![doc = "Operator tooling for fork identifiers and chain fork schedules."]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use clap::Parser;

mod cli;
mod commands;
mod flags;

fn main() -> anyhow::Result<()> {
    sable_cli::backtrace::enable();
    cli::Cli::parse().run()
}
