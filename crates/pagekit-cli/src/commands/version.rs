//! Version commands

use super::{print_json, CliResult, Engine};
use clap::{Args, Subcommand};
use pagekit_core::SnapshotRequest;

#[derive(Debug, Args)]
pub struct VersionArgs {
    #[command(subcommand)]
    pub command: VersionCommand,
}

#[derive(Debug, Subcommand)]
pub enum VersionCommand {
    /// Snapshot the page's current components
    Create {
        page_id: String,
        #[arg(long, default_value = "system")]
        author: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Versions of a page, newest first
    List { page_id: String },
    Show { page_id: String, version_id: String },
}

pub fn execute(args: VersionArgs, engine: &Engine) -> CliResult {
    match args.command {
        VersionCommand::Create {
            page_id,
            author,
            name,
            description,
        } => {
            let request = SnapshotRequest {
                author_id: author,
                version_name: name,
                change_description: description,
            };
            print_json(&engine.create_version(&page_id, request)?)
        }
        VersionCommand::List { page_id } => print_json(&engine.list_versions(&page_id)?),
        VersionCommand::Show {
            page_id,
            version_id,
        } => print_json(&engine.get_version_content(&page_id, &version_id)?),
    }
}
