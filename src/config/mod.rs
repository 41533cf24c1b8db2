//! Configuration module.
//!
//! [`ViewerConfig`] is the resolved configuration consumed by the engine.
//! `loader` reads the optional TOML file and applies the precedence chain
//! Defaults → Config File → Env Vars → CLI Args.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, validate, ConfigError,
    ConfigFile,
};

use crate::layout::{GridBase, LayoutType};
use crate::state::ToolbarPosition;
use std::path::PathBuf;
use std::time::Duration;

/// Zoom bounds and defaults, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomConfig {
    /// Lowest zoom level.
    pub min: u32,
    /// Highest zoom level.
    pub max: u32,
    /// Zoom change per step.
    pub step: u32,
    /// Zoom level after a reset.
    pub default: u32,
}

impl ZoomConfig {
    /// Clamp a requested zoom level to `[min, max]`.
    pub fn clamp(&self, level: u32) -> u32 {
        level.clamp(self.min, self.max)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 10,
            max: 400,
            step: 10,
            default: 100,
        }
    }
}

/// Timing and geometry constants of the text layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextLayerConfig {
    /// Minimum interval between applied pointer-move updates.
    pub move_throttle: Duration,
    /// Grace period before a pointer-leave completes an active drag.
    pub leave_debounce: Duration,
    /// Maximum gap between two clicks forming a double click.
    pub double_click_window: Duration,
    /// Assumed tooltip height in scaled units.
    pub tooltip_height: f64,
    /// Space kept free below a tooltip before it flips above the element.
    pub tooltip_buffer: f64,
    /// Gap between an element and its tooltip.
    pub tooltip_offset: f64,
    /// Margin added on each side of a completed rubber band, as a fraction.
    pub selection_margin: f64,
}

impl Default for TextLayerConfig {
    fn default() -> Self {
        Self {
            move_throttle: Duration::from_millis(16),
            leave_debounce: Duration::from_millis(200),
            double_click_window: Duration::from_millis(300),
            tooltip_height: 24.0,
            tooltip_buffer: 10.0,
            tooltip_offset: 4.0,
            selection_margin: 0.05,
        }
    }
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Zoom bounds.
    pub zoom: ZoomConfig,
    /// Base grid shape; fixed, not user input.
    pub grid: GridBase,
    /// Layout used for single-document datasources without an explicit choice.
    pub default_layout: LayoutType,
    /// Initial toolbar position.
    pub toolbar_position: ToolbarPosition,
    /// Text overlay timings and tooltip geometry.
    pub text_layer: TextLayerConfig,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::default(),
            grid: GridBase::default(),
            default_layout: LayoutType::SingleScrollable,
            toolbar_position: ToolbarPosition::Top,
            text_layer: TextLayerConfig::default(),
            log_file_path: default_log_path(),
        }
    }
}
