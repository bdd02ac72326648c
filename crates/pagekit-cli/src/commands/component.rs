//! Component commands

use super::{parse_json, print_json, CliResult, Engine};
use clap::{Args, Subcommand};
use pagekit_core::{ComponentKind, ComponentPatch};

#[derive(Debug, Args)]
pub struct ComponentArgs {
    #[command(subcommand)]
    pub command: ComponentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ComponentCommand {
    /// Add a default component, optionally merge-patching its payload
    Add(AddArgs),
    /// Merge-patch a component's payload and/or move it
    Update(UpdateArgs),
    Remove {
        page_id: String,
        component_id: String,
    },
    /// Put the listed components first, in the given order
    Reorder {
        page_id: String,
        #[arg(required = true)]
        component_ids: Vec<String>,
    },
    List {
        page_id: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub page_id: String,

    /// text, banner, card, accordion or linkgroup
    #[arg(long)]
    pub kind: String,

    #[arg(long)]
    pub order: Option<u32>,

    /// JSON merge patch over the default payload
    #[arg(long)]
    pub payload: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub page_id: String,
    pub component_id: String,

    #[arg(long)]
    pub order: Option<u32>,

    /// JSON merge patch over the current payload
    #[arg(long)]
    pub payload: Option<String>,
}

pub fn execute(args: ComponentArgs, engine: &Engine) -> CliResult {
    match args.command {
        ComponentCommand::Add(add) => {
            let kind = ComponentKind::parse(&add.kind)
                .ok_or_else(|| format!("Unknown component kind '{}'", add.kind))?;
            let payload = add
                .payload
                .as_deref()
                .map(|raw| parse_json("payload", raw))
                .transpose()?;
            print_json(&engine.add_component(&add.page_id, kind, add.order, payload)?)
        }
        ComponentCommand::Update(update) => {
            let patch = ComponentPatch {
                order: update.order,
                kind: None,
                payload: update
                    .payload
                    .as_deref()
                    .map(|raw| parse_json("payload", raw))
                    .transpose()?,
            };
            if patch.is_empty() {
                return Err("Nothing to update: pass --order and/or --payload".into());
            }
            print_json(&engine.update_component(&update.page_id, &update.component_id, patch)?)
        }
        ComponentCommand::Remove {
            page_id,
            component_id,
        } => print_json(&engine.remove_component(&page_id, &component_id)?),
        ComponentCommand::Reorder {
            page_id,
            component_ids,
        } => print_json(&engine.reorder_components(&page_id, &component_ids)?),
        ComponentCommand::List { page_id } => print_json(&engine.list_components(&page_id)?),
    }
}
