//! Engine configuration

use pagekit_core::errors::{PkError, PkErrorKind};
use pagekit_core::ComparisonMode;

/// Env var selecting revert comparison: `strict` or `content`
pub const ENV_REVERT_COMPARISON: &str = "PAGEKIT_REVERT_COMPARISON";

/// Env var for the default of `create_backup` when a revert does not say
pub const ENV_BACKUP_BY_DEFAULT: &str = "PAGEKIT_BACKUP_BY_DEFAULT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Equality used to decide whether a revert needs a backup
    pub comparison: ComparisonMode,
    pub backup_by_default: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            comparison: ComparisonMode::default(),
            backup_by_default: true,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `PAGEKIT_REVERT_COMPARISON` / `PAGEKIT_BACKUP_BY_DEFAULT`
    ///
    /// # Errors
    /// Returns `InvalidInput` if a variable is set to an unknown value.
    pub fn from_env() -> Result<Self, PkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    ///
    /// # Errors
    /// Returns `InvalidInput` if a variable is set to an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PkError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_REVERT_COMPARISON) {
            config.comparison = raw
                .parse()
                .map_err(|msg: String| invalid_setting(ENV_REVERT_COMPARISON, msg))?;
        }

        if let Some(raw) = lookup(ENV_BACKUP_BY_DEFAULT) {
            config.backup_by_default = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(invalid_setting(
                        ENV_BACKUP_BY_DEFAULT,
                        format!("expected true or false, got '{other}'"),
                    ))
                }
            };
        }

        Ok(config)
    }
}

fn invalid_setting(key: &str, msg: String) -> PkError {
    PkError::new(PkErrorKind::InvalidInput)
        .with_op("engine_config")
        .with_message(format!("{key}: {msg}"))
}
