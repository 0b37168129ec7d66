/// Load failures.
pub mod error;

use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    duration,
    models::{ConfigSource, ReelConfig},
    util::{parse_bool, parse_wrap_mode},
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;

/// Single-value overrides applied on top of the loaded file.
pub const WRAP_MODE_VAR: &str = "REEL_WRAP_MODE";
/// Overrides `carousel.visible_items`.
pub const VISIBLE_ITEMS_VAR: &str = "REEL_VISIBLE_ITEMS";
/// Overrides `carousel.transition_duration`.
pub const TRANSITION_DURATION_VAR: &str = "REEL_TRANSITION_DURATION";
/// Overrides `carousel.max_speed`.
pub const MAX_SPEED_VAR: &str = "REEL_MAX_SPEED";
/// Overrides `carousel.guard_during_transition`.
pub const GUARD_DURING_TRANSITION_VAR: &str = "REEL_GUARD_DURING_TRANSITION";

/// Inputs for a [`ConfigLoader`].
#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    /// File to load instead of searching; must exist.
    pub config_path: Option<PathBuf>,
    /// `.env` file read before loading; a missing file is skipped.
    pub env_file: Option<PathBuf>,
    /// Directory searched for default config files.
    pub base_dir: Option<PathBuf>,
}

/// Loads a [`ReelConfig`] and runs the guard rails.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    /// Effective configuration, overrides applied.
    pub config: ReelConfig,
    /// Where the base configuration came from.
    pub source: ConfigSource,
    /// True when a `.env` file was read.
    pub env_file_loaded: bool,
    /// Questionable values, in the order found.
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    /// Loader with no explicit path or env file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader with every option set at once.
    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    /// Load this file instead of searching.
    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    /// Read this `.env` file first.
    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Directory searched for default config files (defaults to `.`).
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.base_dir = Some(path.into());
        self
    }

    /// Read `.env` into the process environment, then load from it.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with(|key| env::var(key).ok())?;
        load.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Load using `lookup` instead of the process environment. No `.env`
    /// file is read.
    pub fn load_with<F>(&self, lookup: F) -> Result<ConfigLoad, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = self
            .options
            .base_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."));

        let (mut config, source) = match &self.options.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig {
                        path: path.clone(),
                    });
                }
                let config = ReelConfig::load_from_file(path)
                    .map_err(ConfigLoadError::Config)?;
                (config, ConfigSource::Explicit(path.clone()))
            }
            None => ReelConfig::load_with(&lookup, base_dir)
                .map_err(ConfigLoadError::Config)?,
        };

        apply_env_overrides(&mut config, &lookup)?;

        let mut warnings = ConfigWarnings::default();
        if source == ConfigSource::Default {
            warnings.push(validation::defaults_in_use());
        }
        warnings.extend(validation::apply_guard_rails(&config)?);

        info!(?source, "reel configuration loaded");
        Ok(ConfigLoad {
            config,
            source,
            env_file_loaded: false,
            warnings,
        })
    }
}

fn apply_env_overrides<F>(
    config: &mut ReelConfig,
    lookup: &F,
) -> Result<(), ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let carousel = &mut config.carousel;

    if let Some(raw) = non_empty(lookup, WRAP_MODE_VAR) {
        carousel.wrap_mode =
            parse_wrap_mode(&raw).ok_or_else(|| invalid(WRAP_MODE_VAR, &raw))?;
        debug!(wrap_mode = ?carousel.wrap_mode, "override from environment");
    }

    if let Some(raw) = non_empty(lookup, VISIBLE_ITEMS_VAR) {
        carousel.visible_items = raw
            .trim()
            .parse()
            .map_err(|_| invalid(VISIBLE_ITEMS_VAR, &raw))?;
        debug!(
            visible_items = carousel.visible_items,
            "override from environment"
        );
    }

    if let Some(raw) = non_empty(lookup, TRANSITION_DURATION_VAR) {
        carousel.transition_duration = duration::parse(&raw)
            .map_err(|_| invalid(TRANSITION_DURATION_VAR, &raw))?;
        debug!(
            transition_duration = ?carousel.transition_duration,
            "override from environment"
        );
    }

    if let Some(raw) = non_empty(lookup, MAX_SPEED_VAR) {
        let max_speed = raw
            .trim()
            .parse()
            .map_err(|_| invalid(MAX_SPEED_VAR, &raw))?;
        carousel.max_speed = Some(max_speed);
        debug!(max_speed, "override from environment");
    }

    if let Some(raw) = non_empty(lookup, GUARD_DURING_TRANSITION_VAR) {
        carousel.guard_during_transition = parse_bool(&raw)
            .ok_or_else(|| invalid(GUARD_DURING_TRANSITION_VAR, &raw))?;
        debug!(
            guard_during_transition = carousel.guard_during_transition,
            "override from environment"
        );
    }

    Ok(())
}

fn non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|raw| !raw.trim().is_empty())
}

fn invalid(var: &'static str, raw: &str) -> ConfigLoadError {
    ConfigLoadError::InvalidEnv {
        var,
        value: raw.to_string(),
    }
}
