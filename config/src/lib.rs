//! Configuration for Snapdeck.
//!
//! Read from `~/.snapdeck/config.toml` (or the path in `SNAPDECK_CONFIG`):
//!
//! ```toml
//! [app]
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//!
//! [scroll]
//! suppress_window_ms = 1000
//! smooth_scroll_ms = 600
//! snap_idle_ms = 150
//! snap_proximity = 0.25
//!
//! [observer]
//! threshold = 0.1
//! header_offset = 3
//!
//! [[sections]]
//! id = "intro"
//! title = "Hello"
//! description = "First stop"
//! theme = "blue-purple"
//! ```

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use snapdeck_types::{
    Card, RegistryError, Section, SectionId, SectionRegistry, ThemeTag, ui::UiOptions,
};

pub const CONFIG_ENV_VAR: &str = "SNAPDECK_CONFIG";

const DEFAULT_SUPPRESS_WINDOW_MS: u64 = 1000;
const DEFAULT_SMOOTH_SCROLL_MS: u64 = 600;
const DEFAULT_SNAP_IDLE_MS: u64 = 150;
const DEFAULT_SNAP_PROXIMITY: f32 = 0.25;
const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.1;

#[derive(Debug, Default, Deserialize)]
pub struct SnapdeckConfig {
    pub app: Option<AppConfig>,
    pub scroll: Option<ScrollConfig>,
    pub observer: Option<ObserverConfig>,
    /// Replaces the built-in deck when non-empty.
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for dots and arrows.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Jump to sections instead of animating the scroll.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Timing of programmatic scrolls and snapping.
#[derive(Debug, Default, Deserialize)]
pub struct ScrollConfig {
    /// How long visibility reports are ignored after a navigation. Default: 1000.
    pub suppress_window_ms: Option<u64>,
    /// Duration of the scroll-into-view animation. Default: 600.
    pub smooth_scroll_ms: Option<u64>,
    /// Idle time after free scrolling before the view settles. Default: 150.
    pub snap_idle_ms: Option<u64>,
    /// Settle onto a section start only when it is within this fraction of
    /// the viewport height. Default: 0.25. `0` disables snapping.
    pub snap_proximity: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ObserverConfig {
    /// Fraction of a section that must be visible for it to count as in view. Default: 0.1.
    pub threshold: Option<f32>,
    /// Rows hidden under the sticky header. Defaults to the header height.
    pub header_offset: Option<u16>,
}

/// One `[[sections]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    pub id: SectionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub theme: ThemeTag,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl From<SectionConfig> for Section {
    fn from(value: SectionConfig) -> Self {
        Section::new(value.id, value.title, value.description, value.theme)
            .with_cards(value.cards)
            .sanitized()
    }
}

/// Resolved scroll/observer tuning with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    pub suppress_window: Duration,
    pub smooth_scroll: Duration,
    pub snap_idle: Duration,
    pub snap_proximity: f32,
    pub visibility_threshold: f32,
    /// `None` means "use the rendered header height".
    pub header_offset: Option<u16>,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            suppress_window: Duration::from_millis(DEFAULT_SUPPRESS_WINDOW_MS),
            smooth_scroll: Duration::from_millis(DEFAULT_SMOOTH_SCROLL_MS),
            snap_idle: Duration::from_millis(DEFAULT_SNAP_IDLE_MS),
            snap_proximity: DEFAULT_SNAP_PROXIMITY,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            header_offset: None,
        }
    }
}

/// Accepts finite fractions in `[0, 1]`; anything else falls back with a warning.
fn fraction_or_default(name: &str, value: Option<f32>, default: f32) -> f32 {
    match value {
        None => default,
        Some(v) if v.is_finite() && (0.0..=1.0).contains(&v) => v,
        Some(v) => {
            tracing::warn!("Ignoring {name} = {v}: expected a value between 0 and 1");
            default
        }
    }
}

impl SnapdeckConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn scroll_settings(&self) -> ScrollSettings {
        let defaults = ScrollSettings::default();
        let scroll = self.scroll.as_ref();
        let observer = self.observer.as_ref();
        let millis = |value: Option<u64>, default: Duration| {
            value.map_or(default, Duration::from_millis)
        };

        ScrollSettings {
            suppress_window: millis(
                scroll.and_then(|s| s.suppress_window_ms),
                defaults.suppress_window,
            ),
            smooth_scroll: millis(
                scroll.and_then(|s| s.smooth_scroll_ms),
                defaults.smooth_scroll,
            ),
            snap_idle: millis(scroll.and_then(|s| s.snap_idle_ms), defaults.snap_idle),
            snap_proximity: fraction_or_default(
                "scroll.snap_proximity",
                scroll.and_then(|s| s.snap_proximity),
                defaults.snap_proximity,
            ),
            visibility_threshold: fraction_or_default(
                "observer.threshold",
                observer.and_then(|o| o.threshold),
                defaults.visibility_threshold,
            ),
            header_offset: observer.and_then(|o| o.header_offset),
        }
    }

    /// The configured deck, or the built-in one when no sections are configured.
    pub fn registry(&self) -> Result<SectionRegistry, RegistryError> {
        if self.sections.is_empty() {
            return Ok(SectionRegistry::builtin());
        }
        SectionRegistry::new(self.sections.iter().cloned().map(Section::from).collect())
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(raw) = env::var(CONFIG_ENV_VAR)
        && !raw.trim().is_empty()
    {
        return Some(PathBuf::from(raw));
    }
    dirs::home_dir().map(|home| home.join(".snapdeck").join("config.toml"))
}
