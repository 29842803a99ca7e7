//! Forks Subcommand

use crate::flags::GlobalArgs;
use alloy_primitives::B256;
use clap::Parser;
use sable_forkid::ForkId;
use sable_genesis::ChainConfig;
use tabled::Tabled;

/// The `forks` Subcommand
///
/// Lists the scheduled forks of the chain with the fork ID announced once each activates.
///
/// # Usage
///
/// ```sh
/// sable-node forks [FLAGS] [OPTIONS]
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Lists the fork schedule of the chain")]
pub struct ForksCommand {}

/// A row of the fork schedule table.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ForkRow {
    /// Fork name.
    #[tabled(rename = "Fork")]
    pub fork: String,
    /// Activation block.
    #[tabled(rename = "Block")]
    pub block: u64,
    /// Fork ID from the activation block on.
    #[tabled(rename = "Fork ID")]
    pub fork_id: String,
}

impl ForksCommand {
    /// Builds the schedule table rows.
    pub fn rows(config: &ChainConfig, genesis: B256) -> Vec<ForkRow> {
        config
            .scheduled_forks()
            .into_iter()
            .map(|(fork, block)| ForkRow {
                fork: fork.to_string(),
                block,
                fork_id: ForkId::new(config, genesis, block).to_string(),
            })
            .collect()
    }

    /// Renders the rows as a table with the block column right-aligned.
    pub fn table(rows: Vec<ForkRow>) -> tabled::Table {
        let mut table = tabled::Table::new(rows);
        table.with(tabled::settings::Style::modern());
        table.modify(
            tabled::settings::object::Columns::one(1),
            tabled::settings::Alignment::right(),
        );
        table
    }

    /// Runs the subcommand.
    pub fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let config = args.chain_config()?;
        println!("{}", Self::table(Self::rows(&config, args.genesis)));
        Ok(())
    }
}
