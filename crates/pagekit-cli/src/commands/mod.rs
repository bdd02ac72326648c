pub mod component;
pub mod page;
pub mod revert;
pub mod version;

use pagekit_engine::{EngineConfig, PageEngine};
use pagekit_store::SqliteRepository;
use serde::Serialize;
use std::path::Path;

pub type Engine = PageEngine<SqliteRepository>;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store (creating it if needed) with config from the environment
pub fn open_engine(db: &Path) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let repo = SqliteRepository::open(db)?;
    Ok(PageEngine::with_config(repo, config))
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a JSON argument, naming the flag on failure
pub fn parse_json(flag: &str, raw: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    serde_json::from_str(raw).map_err(|e| format!("--{flag} is not valid JSON: {e}").into())
}
