//! Configuration system
//!
//! Shell settings load from TOML or RON files, chosen by file extension.
//! Missing fields fall back to their defaults.

use std::path::Path;

use bitflags::bitflags;
pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match ConfigFormat::of(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::of(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Target form factor; decides window mode and multi-window support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    /// Resizable window, secondary OS windows allowed
    Desktop,
    /// Fixed fullscreen window, single viewport, software keyboard
    Handheld,
}

impl Default for FormFactor {
    fn default() -> Self {
        if cfg!(target_os = "android") {
            Self::Handheld
        } else {
            Self::Desktop
        }
    }
}

bitflags! {
    /// UI layer feature switches applied once during initialization
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UiConfigFlags: u32 {
        /// Panels default into a full-viewport docking area
        const DOCKING = 1 << 0;
        /// Panels dragged outside the main window get their own OS window
        const VIEWPORTS = 1 << 1;
    }
}

/// Shell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Main window title
    pub title: String,
    /// Target form factor
    pub form_factor: FormFactor,
    /// Windowed width (ignored on handheld targets)
    pub window_width: u32,
    /// Windowed height (ignored on handheld targets)
    pub window_height: u32,
    /// Enable panel docking
    pub docking: bool,
    /// Enable secondary OS windows (always off on handheld targets)
    pub viewports: bool,
    /// Fixed delay at the end of every frame, in milliseconds
    pub frame_interval_ms: u64,
    /// Wait for vertical sync when presenting
    pub vsync: bool,
    /// Draw the built-in frame statistics overlay
    pub show_stats_overlay: bool,
    /// Framebuffer clear color (RGBA)
    pub clear_color: [f32; 4],
    /// Display density that maps to a font scale of 1.0
    pub baseline_dpi: f32,
    /// Font scale used when the display density is unknown
    pub fallback_font_scale: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "NMTK".to_string(),
            form_factor: FormFactor::default(),
            window_width: 480,
            window_height: 800,
            docking: true,
            viewports: true,
            frame_interval_ms: 16,
            vsync: true,
            show_stats_overlay: false,
            clear_color: [0.08, 0.08, 0.10, 1.0],
            baseline_dpi: 160.0,
            fallback_font_scale: 2.0,
        }
    }
}

impl Config for ShellConfig {}

impl ShellConfig {
    /// UI flags derived from this configuration
    pub fn ui_flags(&self) -> UiConfigFlags {
        let mut flags = UiConfigFlags::empty();
        if self.docking {
            flags |= UiConfigFlags::DOCKING;
        }
        if self.viewports && self.form_factor == FormFactor::Desktop {
            flags |= UiConfigFlags::VIEWPORTS;
        }
        flags
    }

    /// Font scale for a display of the given density, if known
    pub fn font_scale_for(&self, dpi: Option<f32>) -> f32 {
        match dpi {
            Some(dpi) if dpi > 0.0 && self.baseline_dpi > 0.0 => dpi / self.baseline_dpi,
            _ => self.fallback_font_scale,
        }
    }
}
