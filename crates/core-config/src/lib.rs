//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary). Every
//! section is optional; unknown keys are ignored so older binaries accept newer
//! files. Values that parse but make no sense (unknown font family, malformed
//! color, zero history) are replaced by their defaults with a `config` warning
//! rather than failing startup.

use anyhow::Result;
use core_state::{
    DEFAULT_NOTICE_TTL, FontFamily, FontSize, FontWeight, Rgb, StyleState, UNDO_HISTORY_MAX,
};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const DEFAULT_TICK_MS: u64 = 250;
const MIN_TICK_MS: u64 = 10;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FontConfig {
    pub family: Option<String>,
    pub weight: Option<String>,
    pub size: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UndoConfig {
    #[serde(default = "UndoConfig::default_history_max")]
    pub history_max: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            history_max: Self::default_history_max(),
        }
    }
}

impl UndoConfig {
    const fn default_history_max() -> usize {
        UNDO_HISTORY_MAX
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_message_ms")]
    pub message_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_ms: Self::default_message_ms(),
        }
    }
}

impl StatusConfig {
    const fn default_message_ms() -> u64 {
        DEFAULT_NOTICE_TTL.as_millis() as u64
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tick_ms: Self::default_tick_ms(),
        }
    }
}

impl InputConfig {
    const fn default_tick_ms() -> u64 {
        DEFAULT_TICK_MS
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub colors: ColorConfig,
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub status: StatusConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,
    pub file: ConfigFile,
    pub source: Option<PathBuf>,
}

/// Best-effort config path: `quill.toml` in the working directory, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("quill.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join("quill.toml");
    }
    PathBuf::from("quill.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Startup style built from `[font]` and `[colors]`.
    pub fn initial_style(&self) -> StyleState {
        let mut style = StyleState::default();
        let font = &self.file.font;
        if let Some(name) = font.family.as_deref() {
            match FontFamily::from_label(name) {
                Some(family) => style.family = family,
                None => warn!(target: "config", key = "font.family", value = name, "invalid_value_using_default"),
            }
        }
        if let Some(name) = font.weight.as_deref() {
            match FontWeight::from_label(name) {
                Some(weight) => style.weight = weight,
                None => warn!(target: "config", key = "font.weight", value = name, "invalid_value_using_default"),
            }
        }
        if let Some(points) = font.size {
            match FontSize::new(points) {
                Some(size) => style.size = size,
                None => warn!(target: "config", key = "font.size", value = points, "invalid_value_using_default"),
            }
        }
        style.foreground = parse_color("colors.foreground", self.file.colors.foreground.as_deref());
        style.background = parse_color("colors.background", self.file.colors.background.as_deref());
        style
    }

    pub fn undo_capacity(&self) -> usize {
        let max = self.file.undo.history_max;
        if max == 0 {
            warn!(target: "config", key = "undo.history_max", value = max, "invalid_value_using_default");
            return UNDO_HISTORY_MAX;
        }
        max
    }

    pub fn notice_ttl(&self) -> Duration {
        let ms = self.file.status.message_ms;
        if ms == 0 {
            warn!(target: "config", key = "status.message_ms", value = ms, "invalid_value_using_default");
            return DEFAULT_NOTICE_TTL;
        }
        Duration::from_millis(ms)
    }

    pub fn tick_interval(&self) -> Duration {
        let ms = self.file.input.tick_ms;
        if ms < MIN_TICK_MS {
            warn!(target: "config", key = "input.tick_ms", value = ms, "invalid_value_using_default");
            return Duration::from_millis(DEFAULT_TICK_MS);
        }
        Duration::from_millis(ms)
    }
}

fn parse_color(key: &'static str, value: Option<&str>) -> Option<Rgb> {
    let value = value?;
    let parsed = Rgb::parse_hex(value);
    if parsed.is_none() {
        warn!(target: "config", key, value, "invalid_value_using_default");
    }
    parsed
}
