use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ConfigGuardRailError;

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// An explicit config path does not exist.
    #[error("config file {path} does not exist")]
    MissingConfig { path: PathBuf },
    /// Reading or parsing a config source failed.
    #[error("failed to load reel configuration: {0}")]
    Config(#[source] anyhow::Error),
    /// An override variable held an unparsable value.
    #[error("invalid value `{value}` for {var}")]
    InvalidEnv { var: &'static str, value: String },
    /// The loaded values were rejected.
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    /// The `.env` file exists but could not be read.
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
