//! Configuration file loading with precedence handling.

use super::{TextLayerConfig, ViewerConfig, ZoomConfig};
use crate::layout::{GridBase, LayoutType};
use crate::state::ToolbarPosition;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Values parse but are inconsistent (e.g. default zoom outside bounds).
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/docview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Layout for single-document datasources ("grid", "single-scrollable", "single-page").
    #[serde(default)]
    pub default_layout: Option<String>,

    /// Toolbar position ("top", "bottom", "left", "right").
    #[serde(default)]
    pub toolbar_position: Option<ToolbarPosition>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// `[zoom]` section.
    #[serde(default)]
    pub zoom: Option<ZoomSection>,

    /// `[grid]` section.
    #[serde(default)]
    pub grid: Option<GridSection>,

    /// `[text_layer]` section.
    #[serde(default)]
    pub text_layer: Option<TextLayerSection>,
}

/// `[zoom]` section, all values in percent.
///
/// ```toml
/// [zoom]
/// min = 10
/// max = 400
/// step = 10
/// default = 100
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ZoomSection {
    /// Lowest zoom level.
    #[serde(default)]
    pub min: Option<u32>,
    /// Highest zoom level.
    #[serde(default)]
    pub max: Option<u32>,
    /// Zoom change per step.
    #[serde(default)]
    pub step: Option<u32>,
    /// Initial zoom level.
    #[serde(default)]
    pub default: Option<u32>,
}

/// `[grid]` section: base grid shape.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    /// Base grid rows.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Base grid columns.
    #[serde(default)]
    pub columns: Option<u32>,
}

/// `[text_layer]` section. Durations in milliseconds.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TextLayerSection {
    /// Minimum gap between handled pointer moves.
    #[serde(default)]
    pub move_throttle_ms: Option<u64>,
    /// Delay before a drag completes after the pointer leaves.
    #[serde(default)]
    pub leave_debounce_ms: Option<u64>,
    /// Longest gap between the clicks of a double click.
    #[serde(default)]
    pub double_click_ms: Option<u64>,
    /// Tooltip height in scaled units.
    #[serde(default)]
    pub tooltip_height: Option<f64>,
    /// Space kept between a tooltip and the container edge.
    #[serde(default)]
    pub tooltip_buffer: Option<f64>,
    /// Gap between a tooltip and its element.
    #[serde(default)]
    pub tooltip_offset: Option<f64>,
    /// Margin added around a completed band, as a fraction of its size.
    #[serde(default)]
    pub selection_margin: Option<f64>,
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/docview/docview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("docview").join("docview.log")
    } else {
        PathBuf::from("docview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/docview/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DOCVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/docview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("DOCVIEW_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "DOCVIEW_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// An unknown `default_layout` name is a parse error of that field.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ViewerConfig, ConfigError> {
    let defaults = ViewerConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let default_layout = match config.default_layout {
        Some(name) => name
            .parse::<LayoutType>()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?,
        None => defaults.default_layout,
    };

    let zoom = config.zoom.unwrap_or_default();
    let grid = config.grid.unwrap_or_default();
    let text = config.text_layer.unwrap_or_default();
    let text_defaults = defaults.text_layer;

    Ok(ViewerConfig {
        zoom: ZoomConfig {
            min: zoom.min.unwrap_or(defaults.zoom.min),
            max: zoom.max.unwrap_or(defaults.zoom.max),
            step: zoom.step.unwrap_or(defaults.zoom.step),
            default: zoom.default.unwrap_or(defaults.zoom.default),
        },
        grid: GridBase {
            rows: grid.rows.unwrap_or(defaults.grid.rows),
            columns: grid.columns.unwrap_or(defaults.grid.columns),
        },
        default_layout,
        toolbar_position: config
            .toolbar_position
            .unwrap_or(defaults.toolbar_position),
        text_layer: TextLayerConfig {
            move_throttle: text
                .move_throttle_ms
                .map(Duration::from_millis)
                .unwrap_or(text_defaults.move_throttle),
            leave_debounce: text
                .leave_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(text_defaults.leave_debounce),
            double_click_window: text
                .double_click_ms
                .map(Duration::from_millis)
                .unwrap_or(text_defaults.double_click_window),
            tooltip_height: text.tooltip_height.unwrap_or(text_defaults.tooltip_height),
            tooltip_buffer: text.tooltip_buffer.unwrap_or(text_defaults.tooltip_buffer),
            tooltip_offset: text.tooltip_offset.unwrap_or(text_defaults.tooltip_offset),
            selection_margin: text
                .selection_margin
                .unwrap_or(text_defaults.selection_margin),
        },
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DOCVIEW_DEFAULT_LAYOUT`: Override default layout
/// - `DOCVIEW_DEFAULT_ZOOM`: Override default zoom (percent)
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ViewerConfig) -> ViewerConfig {
    if let Ok(layout) = std::env::var("DOCVIEW_DEFAULT_LAYOUT") {
        match layout.parse::<LayoutType>() {
            Ok(layout) => config.default_layout = layout,
            Err(e) => warn!(error = %e, "Ignoring DOCVIEW_DEFAULT_LAYOUT"),
        }
    }

    if let Ok(zoom) = std::env::var("DOCVIEW_DEFAULT_ZOOM") {
        match zoom.parse::<u32>() {
            Ok(zoom) => config.zoom.default = zoom,
            Err(e) => warn!(value = %zoom, error = %e, "Ignoring DOCVIEW_DEFAULT_ZOOM"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
pub fn apply_cli_overrides(
    mut config: ViewerConfig,
    layout_override: Option<LayoutType>,
    zoom_override: Option<u32>,
) -> ViewerConfig {
    if let Some(layout) = layout_override {
        config.default_layout = layout;
    }

    if let Some(zoom) = zoom_override {
        config.zoom.default = zoom;
    }

    config
}

/// Check cross-field consistency of a resolved config.
pub fn validate(config: ViewerConfig) -> Result<ViewerConfig, ConfigError> {
    let zoom = config.zoom;
    if zoom.min == 0 || zoom.step == 0 {
        return Err(ConfigError::Invalid(
            "zoom min and step must be > 0".to_string(),
        ));
    }
    if zoom.min > zoom.max {
        return Err(ConfigError::Invalid(format!(
            "zoom min {} exceeds max {}",
            zoom.min, zoom.max
        )));
    }
    if zoom.default < zoom.min || zoom.default > zoom.max {
        return Err(ConfigError::Invalid(format!(
            "default zoom {} outside [{}, {}]",
            zoom.default, zoom.min, zoom.max
        )));
    }
    if config.grid.rows == 0 || config.grid.columns == 0 {
        return Err(ConfigError::Invalid(
            "grid rows and columns must be > 0".to_string(),
        ));
    }
    if config.default_layout == LayoutType::None {
        return Err(ConfigError::Invalid(
            "default layout cannot be 'none'".to_string(),
        ));
    }
    let margin = config.text_layer.selection_margin;
    if !(0.0..1.0).contains(&margin) {
        return Err(ConfigError::Invalid(format!(
            "selection margin {margin} outside [0, 1)"
        )));
    }
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
