// config.rs

use crate::error::Result;
use crate::render::{Color, Theme};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// Ticks per quarter note.
pub const TIMEBASE: u32 = 480;
pub const BEATS_PER_BAR: u32 = 4;
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Prefix for environment overrides, e.g. `CTRLGRAPH__GRAPH__HEIGHT=120`.
pub const ENV_PREFIX: &str = "CTRLGRAPH";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub width: f64,
    pub height: f64,
    pub line_width: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            width: 80.0,
            height: 20.0,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub background_color: String,
    pub divider_color: String,
    pub theme_color: String,
    pub cursor_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background_color: "#252525".to_string(),
            divider_color: "#4d4d4d".to_string(),
            theme_color: "#5f97ff".to_string(),
            cursor_color: "#ff5f5f".to_string(),
        }
    }
}

impl ThemeSettings {
    pub fn to_theme(&self) -> Result<Theme> {
        Ok(Theme {
            background_color: Color::from_hex(&self.background_color)?,
            divider_color: Color::from_hex(&self.divider_color)?,
            theme_color: Color::from_hex(&self.theme_color)?,
            cursor_color: Color::from_hex(&self.cursor_color)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub timebase: u32,
    pub beats_per_bar: u32,
    /// Quantize value in denominator units (8 = eighth notes).
    pub quantize: f64,
    /// Horizontal zoom factor of the piano roll.
    pub zoom: f64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            timebase: TIMEBASE,
            beats_per_bar: BEATS_PER_BAR,
            quantize: 8.0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub graph: GraphSettings,
    pub theme: ThemeSettings,
    pub timing: TimingSettings,
}

impl AppConfig {
    /// Layers defaults, an optional config file and environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.timing.timebase, TIMEBASE);
        assert_eq!(config.graph.line_width, DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join("ctrlgraph_config_test.toml");
        fs::write(
            &path,
            "[graph]\nheight = 64.0\n\n[timing]\nquantize = 16.0\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.graph.height, 64.0);
        assert_eq!(config.graph.width, GraphSettings::default().width);
        assert_eq!(config.timing.quantize, 16.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("ctrlgraph_missing_config.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_default_theme_parses() {
        let theme = ThemeSettings::default().to_theme().unwrap();
        assert_eq!(theme.cursor_color, Color::rgb(0xff, 0x5f, 0x5f));
    }
}
