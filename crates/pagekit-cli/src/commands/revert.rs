//! Revert command

use super::{print_json, CliResult, Engine};
use clap::Args;

#[derive(Debug, Args)]
pub struct RevertArgs {
    pub page_id: String,
    pub version_id: String,

    /// Back up the current state even if backups are off by default
    #[arg(long, conflicts_with = "no_backup")]
    pub backup: bool,

    /// Skip the automatic backup of the current state
    #[arg(long)]
    pub no_backup: bool,

    #[arg(long, default_value = "system")]
    pub author: String,
}

pub fn execute(args: RevertArgs, engine: &Engine) -> CliResult {
    // Without either flag the engine's configured default decides.
    let create_backup = match (args.backup, args.no_backup) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let result = engine.revert(&args.page_id, &args.version_id, create_backup, &args.author)?;
    print_json(&result)
}
