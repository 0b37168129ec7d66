//! Configuration library for reel carousels.
//!
//! Loads a [`ReelConfig`] from an explicit file, `$REEL_CONFIG_PATH`,
//! inline `$REEL_CONFIG_JSON`, a default file in the working directory, or
//! built-in defaults, then layers single-value environment overrides on top
//! and runs guard rails. Hosts and `reelctl` share this so there is one
//! source of truth for defaults and validation.

pub mod duration;
/// Full load pipeline with `.env` and overrides.
pub mod loader;
/// Serde models and source discovery.
pub mod models;
/// Parsers for env-style values.
pub mod util;
/// Guard rails and warnings.
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{CarouselConfig, ConfigSource, ReelConfig, TrackConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
