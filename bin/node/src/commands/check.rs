//! Check-forkid Subcommand

use crate::flags::GlobalArgs;
use alloy_primitives::FixedBytes;
use clap::Parser;
use sable_forkid::{ForkFilter, ForkHash, ForkId, ForkIdError};

/// The `check-forkid` Subcommand
///
/// Validates a fork ID announced by a remote peer against the local fork schedule, as the
/// status handshake does.
///
/// # Usage
///
/// ```sh
/// sable-node check-forkid --hash <HEX> --next <NUMBER> --head <NUMBER>
/// ```
#[derive(Parser, Debug, Clone)]
#[command(about = "Checks a remote fork ID against the local fork schedule")]
pub struct CheckForkIdCommand {
    /// The remote fork hash, as 4 hex encoded bytes.
    #[arg(long, value_parser = parse_fork_hash)]
    pub hash: ForkHash,
    /// The next fork block announced by the remote.
    #[arg(long, default_value_t = 0)]
    pub next: u64,
    /// The local head block number.
    #[arg(long, default_value_t = 0)]
    pub head: u64,
}

fn parse_fork_hash(s: &str) -> Result<ForkHash, String> {
    s.parse::<FixedBytes<4>>().map(|bytes| ForkHash(bytes.0)).map_err(|err| err.to_string())
}

impl CheckForkIdCommand {
    /// Validates the remote fork ID.
    pub fn check(&self, args: &GlobalArgs) -> anyhow::Result<Result<(), ForkIdError>> {
        let config = args.chain_config()?;
        let head = self.head;
        let filter = ForkFilter::new(&config, args.genesis, move || head);
        Ok(filter.validate(ForkId { hash: self.hash, next: self.next }))
    }

    /// Runs the subcommand.
    pub fn run(self, args: &GlobalArgs) -> anyhow::Result<()> {
        let remote = ForkId { hash: self.hash, next: self.next };
        match self.check(args)? {
            Ok(()) => println!("{remote}: compatible"),
            Err(err @ ForkIdError::RemoteStale) => {
                println!("{remote}: {err}, peer kept");
            }
            Err(err) => anyhow::bail!("{remote}: {err}"),
        }
        Ok(())
    }
}
