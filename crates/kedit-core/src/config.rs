//! Editor configuration.
//!
//! Plain serde structs with `#[serde(default)]` so an on-disk config can
//! name only the fields it overrides. Stored as TOML under the platform
//! config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{CoreError, CoreResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Loads the config from the default location, falling back to
    /// defaults when the file is absent or unreadable.
    pub fn load() -> Self {
        match Self::default_path().map(|p| Self::load_from(&p)) {
            Ok(Ok(config)) => config,
            _ => Self::default(),
        }
    }

    /// Loads from a specific TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Default config file path: `<config dir>/kedit/config.toml`.
    pub fn default_path() -> CoreResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CoreError::Config("no config directory".to_string()))?;
        Ok(dir.join("kedit").join("config.toml"))
    }

    /// Writes the config to the default location.
    pub fn save(&self) -> CoreResult<()> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

/// Engine behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font file used for all editor text.
    pub font_path: PathBuf,

    /// Initial font point size.
    pub font_size: u16,

    /// Spaces inserted for a Tab press.
    pub tab_width: usize,

    /// Lines that must stay visible above/below the cursor when the
    /// viewport scrolls to follow it.
    pub cursor_margin_lines: usize,

    /// Cursor blink period in seconds.
    pub cursor_blink_duration: f32,

    /// Pixel gap reserved left of the gutter.
    pub gutter_margin: i32,

    /// Document capacity: maximum line count.
    pub max_lines: usize,

    /// Document capacity: maximum line length in bytes.
    pub max_line_len: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("resources/fonts/SourceCodePro-Bold.ttf"),
            font_size: 18,
            tab_width: 4,
            cursor_margin_lines: 3,
            cursor_blink_duration: 1.2,
            gutter_margin: 40,
            max_lines: 1024,
            max_line_len: 256,
        }
    }
}

/// Window appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub titlebar_height: i32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 1000,
            window_height: 600,
            titlebar_height: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.editor.cursor_margin_lines, 3);
        assert_eq!(config.editor.max_lines, 1024);
        assert_eq!(config.editor.max_line_len, 256);
        assert!(config.editor.cursor_blink_duration > 0.0);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[editor]\ntab_width = 2\n").unwrap();
        assert_eq!(config.editor.tab_width, 2);
        assert_eq!(config.editor.font_size, 18);
        assert_eq!(config.ui.window_width, 1000);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.editor.font_size, config.editor.font_size);
        assert_eq!(back.ui.titlebar_height, config.ui.titlebar_height);
    }
}
