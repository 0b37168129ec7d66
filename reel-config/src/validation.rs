use std::{fmt, time::Duration};

use reel_core::{SettingsError, WrapMode};
use thiserror::Error;

use crate::models::ReelConfig;

const MIN_SMOOTH_DURATION: Duration = Duration::from_millis(16);
const MAX_RESPONSIVE_DURATION: Duration = Duration::from_secs(3);

/// Configuration the carousel cannot run with.
#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    /// Settings rejected by the core, including oversized clone pools.
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
}

/// A questionable but usable value, tied to the config key it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted config key, e.g. `carousel.max_speed`.
    pub key: &'static str,
    /// What looked wrong.
    pub message: String,
    /// Suggested remedy.
    pub hint: Option<&'static str>,
}

impl ConfigWarning {
    fn new(key: &'static str, message: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
            hint: None,
        }
    }

    fn hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Warnings gathered while loading, in the order they were raised.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigWarnings(Vec<ConfigWarning>);

impl ConfigWarnings {
    /// True when nothing looked questionable.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of warnings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Warnings in the order they were raised.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigWarning> {
        self.0.iter()
    }

    /// True when some warning concerns `key`.
    pub fn concerns(&self, key: &str) -> bool {
        self.0.iter().any(|warning| warning.key == key)
    }

    pub(crate) fn push(&mut self, warning: ConfigWarning) {
        self.0.push(warning);
    }
}

impl Extend<ConfigWarning> for ConfigWarnings {
    fn extend<I: IntoIterator<Item = ConfigWarning>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ConfigWarnings {
    type Item = ConfigWarning;
    type IntoIter = std::vec::IntoIter<ConfigWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigWarnings {
    type Item = &'a ConfigWarning;
    type IntoIter = std::slice::Iter<'a, ConfigWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Reject settings the carousel cannot mount with and collect warnings for
/// the questionable ones.
pub fn apply_guard_rails(
    config: &ReelConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let settings = config.carousel.to_settings();
    let items = config.track.items;
    settings.validate_for(items)?;

    let mut warnings = ConfigWarnings::default();
    let infinite = settings.wrap_mode == WrapMode::Infinite;

    if items == 0 {
        warnings.push(
            ConfigWarning::new(
                "track.items",
                "0 items; the carousel will ignore every command",
            )
            .hint("Set track.items to the length of the sequence"),
        );
    } else if !infinite && settings.visible_items >= items {
        warnings.push(
            ConfigWarning::new(
                "carousel.visible_items",
                format!(
                    "{} visible items cover all {items}; a finite carousel cannot scroll",
                    settings.visible_items
                ),
            )
            .hint("Lower visible_items or switch wrap_mode to infinite"),
        );
    }

    if settings.max_speed == Some(0) {
        warnings.push(ConfigWarning::new(
            "carousel.max_speed",
            "0; fast flicks will not travel further than the drag",
        ));
    }

    let duration = settings.transition_duration;
    if duration < MIN_SMOOTH_DURATION {
        warnings.push(
            ConfigWarning::new(
                "carousel.transition_duration",
                format!(
                    "{} is shorter than one 60Hz frame",
                    humantime::format_duration(duration)
                ),
            )
            .hint("Moves will look like jumps; use at least 16ms"),
        );
    } else if duration > MAX_RESPONSIVE_DURATION {
        warnings.push(
            ConfigWarning::new(
                "carousel.transition_duration",
                format!(
                    "{} blocks navigation for a long time",
                    humantime::format_duration(duration)
                ),
            )
            .hint("Guarded commands are ignored until each move ends"),
        );
    }

    if !settings.guard_during_transition && !infinite {
        warnings.push(ConfigWarning::new(
            "carousel.guard_during_transition",
            "off; rapid next presses in a finite carousel stack moves until \
             the last page",
        ));
    }

    let width = config.track.viewport_width;
    if width <= 0.0 || !width.is_finite() {
        warnings.push(ConfigWarning::new(
            "track.viewport_width",
            "not a positive number; offsets stay at 0 until a measurement \
             arrives",
        ));
    }

    Ok(warnings)
}

/// Warning for a config that came from built-in defaults alone.
pub(crate) fn defaults_in_use() -> ConfigWarning {
    ConfigWarning::new("config", "no reel.toml detected; using built-in defaults")
        .hint("Run `reelctl config` to print a starting configuration")
}
