mod audit;
mod verify;

use crate::cli::{Cli, Commands};
use anyhow::Result;

pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Audit(args) => audit::execute(args, cli.json).await,
        Commands::Verify(args) => verify::execute(args, cli.json).await,
    }
}
