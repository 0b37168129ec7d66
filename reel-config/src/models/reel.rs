use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, anyhow};
use reel_core::{CarouselSettings, Easing, WrapMode};
use serde::{Deserialize, Serialize};

/// File holding a TOML or JSON config.
pub const CONFIG_PATH_VAR: &str = "REEL_CONFIG_PATH";
/// Inline JSON config.
pub const CONFIG_JSON_VAR: &str = "REEL_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "reel.toml",
    "reel.json",
    "config/reel.toml",
    "config/reel.json",
];

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// Built-in defaults; nothing was found.
    #[default]
    Default,
    /// A path passed to the loader.
    Explicit(PathBuf),
    /// The file named by `REEL_CONFIG_PATH`.
    EnvPath(PathBuf),
    /// JSON from `REEL_CONFIG_JSON`.
    EnvInline,
    /// A default file found in the base directory.
    File(PathBuf),
}

impl ConfigSource {
    /// File the config was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path)
            | ConfigSource::EnvPath(path)
            | ConfigSource::File(path) => Some(path),
            ConfigSource::Default | ConfigSource::EnvInline => None,
        }
    }
}

/// Top-level reel configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Behavior of every carousel built from this config.
    pub carousel: CarouselConfig,
    /// Sample track used by headless drivers such as `reelctl`.
    pub track: TrackConfig,
}

/// Carousel tuning. Mirrors [`CarouselSettings`] with file-friendly types.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// `finite` stops at both ends; `infinite` wraps seamlessly.
    pub wrap_mode: WrapMode,
    /// Items shown side by side. Must be at least 1.
    pub visible_items: usize,
    /// Length of one animated move, e.g. `"300ms"`. Also the fallback
    /// timeout when the renderer never reports the end of a move.
    #[serde(with = "crate::duration")]
    pub transition_duration: Duration,
    /// Curve for animated moves.
    pub easing: Easing,
    /// Cap on extra slides from a fast flick. Defaults to half the sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<usize>,
    /// Ignore `next` while a move is still animating.
    pub guard_during_transition: bool,
    /// Minimum clone copies on each side of the canonical block.
    pub clone_assist_factor: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::from(&CarouselSettings::default())
    }
}

impl From<&CarouselSettings> for CarouselConfig {
    fn from(settings: &CarouselSettings) -> Self {
        Self {
            wrap_mode: settings.wrap_mode,
            visible_items: settings.visible_items,
            transition_duration: settings.transition_duration,
            easing: settings.easing,
            max_speed: settings.max_speed,
            guard_during_transition: settings.guard_during_transition,
            clone_assist_factor: settings.clone_assist_factor,
        }
    }
}

impl CarouselConfig {
    /// Settings for [`reel_core::Carousel::new`].
    pub fn to_settings(&self) -> CarouselSettings {
        CarouselSettings {
            wrap_mode: self.wrap_mode,
            visible_items: self.visible_items,
            transition_duration: self.transition_duration,
            easing: self.easing,
            max_speed: self.max_speed,
            guard_during_transition: self.guard_during_transition,
            clone_assist_factor: self.clone_assist_factor,
        }
    }
}

/// Sample track for headless runs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Number of items in the sample sequence.
    pub items: usize,
    /// Viewport width in pixels reported on mount.
    pub viewport_width: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            items: 5,
            viewport_width: 600.0,
        }
    }
}

impl ReelConfig {
    /// Load configuration using the process environment.
    /// Evaluation order:
    /// 1) `$REEL_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$REEL_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults if none of the above exist.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same as [`ReelConfig::load_from_env`] with an injected variable
    /// lookup and a base directory for the default file search.
    pub fn load_with<F>(
        lookup: F,
        base_dir: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    /// Load a file, picking the format from its extension.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read reel config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid reel config {}", path.display())
            }),
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid reel config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// Parse contents of unknown format: TOML first, then JSON.
    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse reel config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    /// Parse a JSON document.
    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid reel config json: {err}"))
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render reel config")
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_settings() {
        let config = ReelConfig::default();
        assert_eq!(config.carousel.to_settings(), CarouselSettings::default());
        assert_eq!(config.track.items, 5);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: ReelConfig = toml::from_str(
            r#"
            [carousel]
            wrap_mode = "infinite"
            transition_duration = "450ms"
            easing = "ease_out_cubic"
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.wrap_mode, WrapMode::Infinite);
        assert_eq!(
            config.carousel.transition_duration,
            Duration::from_millis(450)
        );
        assert_eq!(config.carousel.easing, Easing::EaseOutCubic);
        assert_eq!(config.carousel.visible_items, 1);
        assert_eq!(config.carousel.max_speed, None);
        assert_eq!(config.track, TrackConfig::default());
    }

    #[test]
    fn json_accepts_millisecond_integers() {
        let config = ReelConfig::parse_json(
            r#"{"carousel": {"transition_duration": 120, "max_speed": 3}}"#,
        )
        .unwrap();
        assert_eq!(
            config.carousel.transition_duration,
            Duration::from_millis(120)
        );
        assert_eq!(config.carousel.max_speed, Some(3));
    }

    #[test]
    fn unknown_format_falls_back_to_json() {
        let config =
            ReelConfig::parse_from_str(r#"{"track": {"items": 9}}"#, "inline")
                .unwrap();
        assert_eq!(config.track.items, 9);

        let err = ReelConfig::parse_from_str("[[[", "inline").unwrap_err();
        assert!(err.to_string().contains("toml error"));
    }

    #[test]
    fn rendered_toml_parses_back() {
        let mut config = ReelConfig::default();
        config.carousel.wrap_mode = WrapMode::Infinite;
        config.carousel.max_speed = Some(4);
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("transition_duration = \"300ms\""));
        let parsed: ReelConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
