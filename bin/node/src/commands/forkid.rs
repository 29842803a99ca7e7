//! Forkid Subcommand

use crate::flags::GlobalArgs;
use clap::Parser;
use sable_forkid::ForkId;

/// The `forkid` Subcommand
///
/// Computes the fork ID the local node announces at a given head block.
///
/// # Usage
///
/// ```sh
/// sable-node forkid --head <NUMBER> [--json]
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Computes the local fork ID at a head block")]
pub struct ForkIdCommand {
    /// The head block number.
    #[arg(long, default_value_t = 0)]
    pub head: u64,
    /// Prints the fork ID as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ForkIdCommand {
    /// Computes the fork ID described by the arguments.
    pub fn fork_id(&self, args: &GlobalArgs) -> anyhow::Result<ForkId> {
        let config = args.chain_config()?;
        Ok(ForkId::new(&config, args.genesis, self.head))
    }

    /// Runs the subcommand.
    pub fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let id = self.fork_id(args)?;
        tracing::debug!(target: "forkid", head = self.head, %id, "Computed fork id");
        if self.json {
            println!("{}", serde_json::to_string_pretty(&id)?);
        } else {
            println!("{id}");
        }
        Ok(())
    }
}
