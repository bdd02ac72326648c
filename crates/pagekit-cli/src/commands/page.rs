//! Page commands

use super::{print_json, CliResult, Engine};
use clap::{Args, Subcommand};
use pagekit_core::PageTemplate;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PageArgs {
    #[command(subcommand)]
    pub command: PageCommand,
}

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Create an empty page, or one filled from a template file
    Create(CreateArgs),
    /// Print a page with its components in order
    Show { page_id: String },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Template id recorded on the page
    #[arg(long, conflicts_with = "template_file")]
    pub template: Option<String>,

    /// JSON template (`{"id": ..., "blocks": [{"type": ...}]}`) to initialize from
    #[arg(long)]
    pub template_file: Option<PathBuf>,
}

pub fn execute(args: PageArgs, engine: &Engine) -> CliResult {
    match args.command {
        PageCommand::Create(create) => execute_create(create, engine),
        PageCommand::Show { page_id } => print_json(&engine.get_page(&page_id)?),
    }
}

fn execute_create(args: CreateArgs, engine: &Engine) -> CliResult {
    let page = match (args.template, args.template_file) {
        (_, Some(path)) => {
            let raw = std::fs::read_to_string(&path)?;
            let template: PageTemplate = serde_json::from_str(&raw)
                .map_err(|e| format!("{} is not a valid template: {e}", path.display()))?;
            engine.create_page_from_template(&template)?
        }
        (Some(template_id), None) => engine.create_page(&template_id)?,
        (None, None) => return Err("Must specify either --template or --template-file".into()),
    };
    print_json(&page)
}
