// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! Unknown or malformed files fall back to defaults with a warning key the
//! caller can surface as a notification; a broken config never prevents the
//! application from starting.

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedShutter";

/// Warning key surfaced when an existing config file cannot be parsed.
pub const CONFIG_PARSE_WARNING_KEY: &str = "notification-config-parse-warning";

// Capture limits: the recording ring runs out at `max_clip_secs`.
pub const MIN_CLIP_SECS: u32 = 1;
pub const MAX_CLIP_SECS: u32 = 60;
pub const DEFAULT_CLIP_SECS: u32 = 10;

// Trim strip thumbnail count.
pub const MIN_STRIP_THUMBNAILS: usize = 4;
pub const MAX_STRIP_THUMBNAILS: usize = 24;
pub const DEFAULT_STRIP_THUMBNAILS: usize = 10;

// Deletion zone radius in logical pixels.
pub const MIN_TRASH_RADIUS: f32 = 24.0;
pub const MAX_TRASH_RADIUS: f32 = 120.0;
pub const DEFAULT_TRASH_RADIUS: f32 = 48.0;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub capture: Capture,
    #[serde(default)]
    pub trim: Trim,
    #[serde(default)]
    pub annotate: Annotate,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct General {
    pub language: Option<String>,
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Capture {
    /// Maximum hold-to-record duration in seconds.
    #[serde(default)]
    pub max_clip_secs: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Trim {
    /// Number of thumbnails extracted for the trim strip.
    #[serde(default)]
    pub strip_thumbnails: Option<usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Annotate {
    /// Radius of the drag-to-trash zone in logical pixels.
    #[serde(default)]
    pub trash_radius: Option<f32>,
}

impl Config {
    /// Maximum clip duration, clamped to the supported range.
    #[must_use]
    pub fn max_clip_secs(&self) -> u32 {
        self.capture
            .max_clip_secs
            .unwrap_or(DEFAULT_CLIP_SECS)
            .clamp(MIN_CLIP_SECS, MAX_CLIP_SECS)
    }

    /// Trim strip thumbnail count, clamped to the supported range.
    #[must_use]
    pub fn strip_thumbnails(&self) -> usize {
        self.trim
            .strip_thumbnails
            .unwrap_or(DEFAULT_STRIP_THUMBNAILS)
            .clamp(MIN_STRIP_THUMBNAILS, MAX_STRIP_THUMBNAILS)
    }

    /// Deletion zone radius, clamped to the supported range.
    #[must_use]
    pub fn trash_radius(&self) -> f32 {
        self.annotate
            .trash_radius
            .unwrap_or(DEFAULT_TRASH_RADIUS)
            .clamp(MIN_TRASH_RADIUS, MAX_TRASH_RADIUS)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration, falling back to defaults when the file is absent
/// or unreadable. The second element is a warning key when an existing file
/// had to be discarded.
pub fn load() -> (Config, Option<&'static str>) {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => (config, None),
                    Err(_) => (Config::default(), Some(CONFIG_PARSE_WARNING_KEY)),
                },
                Err(_) => (Config::default(), Some(CONFIG_PARSE_WARNING_KEY)),
            };
        }
    }
    (Config::default(), None)
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_values() {
        let config = Config {
            general: General {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            capture: Capture {
                max_clip_secs: Some(15),
            },
            trim: Trim {
                strip_thumbnails: Some(12),
            },
            annotate: Annotate {
                trash_radius: Some(64.0),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.general.language, config.general.language);
        assert_eq!(loaded.capture.max_clip_secs, Some(15));
        assert_eq!(loaded.trim.strip_thumbnails, Some(12));
        assert_eq!(loaded.annotate.trash_radius, Some(64.0));
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.general.language.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested_dir = temp_dir.path().join("deep").join("path");
        let config_path = nested_dir.join("settings.toml");
        let config = Config::default();

        save_to_path(&config, &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let config = Config {
            capture: Capture {
                max_clip_secs: Some(600),
            },
            trim: Trim {
                strip_thumbnails: Some(1),
            },
            annotate: Annotate {
                trash_radius: Some(5.0),
            },
            ..Config::default()
        };

        assert_eq!(config.max_clip_secs(), MAX_CLIP_SECS);
        assert_eq!(config.strip_thumbnails(), MIN_STRIP_THUMBNAILS);
        assert_eq!(config.trash_radius(), MIN_TRASH_RADIUS);
    }

    #[test]
    fn default_accessors_return_defaults() {
        let config = Config::default();
        assert_eq!(config.max_clip_secs(), DEFAULT_CLIP_SECS);
        assert_eq!(config.strip_thumbnails(), DEFAULT_STRIP_THUMBNAILS);
        assert_eq!(config.trash_radius(), DEFAULT_TRASH_RADIUS);
    }
}
