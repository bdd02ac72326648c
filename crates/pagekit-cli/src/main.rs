//! pagekit CLI
//!
//! Command-line interface over a SQLite page store. Results are printed
//! to stdout as pretty JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use pagekit_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pagekit")]
#[command(about = "pagekit - pages, components, versions and revert", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "PAGEKIT_DB", default_value = ".pagekit/store.db")]
    db: PathBuf,

    /// Log profile: dev or prod
    #[arg(long, global = true, env = "PAGEKIT_LOG", default_value = "dev")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create and show pages
    Page(commands::page::PageArgs),
    /// Edit a page's components
    Component(commands::component::ComponentArgs),
    /// Snapshot, list and show versions
    Version(commands::version::VersionArgs),
    /// Revert a page to one of its versions
    Revert(commands::revert::RevertArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = commands::open_engine(&cli.db).and_then(|engine| match cli.command {
        Commands::Page(args) => commands::page::execute(args, &engine),
        Commands::Component(args) => commands::component::execute(args, &engine),
        Commands::Version(args) => commands::version::execute(args, &engine),
        Commands::Revert(args) => commands::revert::execute(args, &engine),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
